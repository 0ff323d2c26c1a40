use async_trait::async_trait;

/// Context id of the whole site; avatar busts are stored there.
pub const SYSTEM_CONTEXT_ID: u64 = 1;

/// File metadata as kept by the host file storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFile {
    pub context_id: u64,
    pub component: String,
    pub file_area: String,
    pub item_id: u64,
    /// Directory inside the area, always starting and ending with `/`.
    pub file_path: String,
    pub file_name: String,
    pub is_directory: bool,
    pub mime_type: String,
    pub size: u64,
}

impl StoredFile {
    /// Directory entries are stored with `.` as file name.
    pub fn is_placeholder(&self) -> bool {
        self.is_directory || self.file_name.is_empty() || self.file_name == "."
    }

    /// Path identifying the file within the storage: `/ctx/component/area/item/path/name`.
    pub fn pathname(&self) -> String {
        format!(
            "/{}/{}/{}/{}{}{}",
            self.context_id,
            self.component,
            self.file_area,
            self.item_id,
            self.file_path,
            self.file_name
        )
    }
}

/// Host file storage, reached only through these lookups.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Files in an area, directory markers included.
    async fn area_files(
        &self,
        context_id: u64,
        component: &str,
        file_area: &str,
        item_id: u64,
    ) -> anyhow::Result<Vec<StoredFile>>;

    /// Look a file up by the hex SHA-1 of its full path.
    async fn file_by_hash(&self, path_hash: &str) -> anyhow::Result<Option<StoredFile>>;

    async fn read(&self, file: &StoredFile) -> anyhow::Result<Vec<u8>>;
}
