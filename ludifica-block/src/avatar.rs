use ludifica_core::files::{FileStore, SYSTEM_CONTEXT_ID};
use ludifica_core::lang::{Lang, get_string};
use ludifica_core::store::AvatarStore;
use ludifica_core::{AssetResolver, Error, Result};
use ludifica_database::model::avatars::{AvatarRecord, DEFAULT_AVATAR_TYPE};
use ludifica_database::model::leveling::Level;
use ludifica_utils::COMPONENT;
use ludifica_utils::formatting::substitute_tokens;

pub const DEFAULT_AVATAR_IMAGE: &str = "avatar_gris-8";
pub const BUST_FILE_AREA: &str = "avatarbust";

/// An avatar record plus the rules that turn it into an image URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avatar {
    record: AvatarRecord,
}

impl Avatar {
    pub fn new(record: AvatarRecord) -> Self {
        Self { record }
    }

    pub async fn load(store: &dyn AvatarStore, id: u64) -> Result<Self> {
        match store.get_avatar(id).await? {
            Some(record) => Ok(Self::new(record)),
            None => Err(Error::NotFound("errornotavatardata")),
        }
    }

    pub fn record(&self) -> &AvatarRecord {
        &self.record
    }

    /// The per-level source for `level`, with `{name}`, `{level}` and
    /// `{levelname}` filled in. `None` when the avatar has no sources.
    pub fn source_uri(&self, level: u64, levels: &[Level]) -> Option<String> {
        if self.record.sources.is_empty() {
            return None;
        }

        let sources: Vec<&str> = self.record.sources.split('\n').collect();
        let index = usize::try_from(level).unwrap_or(usize::MAX);
        let uri = sources
            .get(index)
            .or_else(|| sources.last())
            .copied()
            .unwrap_or_default();

        if !uri.contains('{') {
            return Some(uri.trim().to_owned());
        }

        let level_text = level.to_string();
        let level_name = levels.get(index).map_or("", |level| level.name.as_str());
        let resolved = substitute_tokens(
            uri,
            &[
                ("name", self.record.name.as_str()),
                ("level", level_text.as_str()),
                ("levelname", level_name),
            ],
        );
        Some(resolved.trim().to_owned())
    }

    /// Image URI for `level`, or the bust image when no level is requested.
    pub async fn uri(
        &self,
        level: Option<u64>,
        levels: &[Level],
        files: &dyn FileStore,
        assets: &dyn AssetResolver,
    ) -> Result<String> {
        if let Some(uri) = level.and_then(|level| self.source_uri(level, levels)) {
            return Ok(uri);
        }

        self.bust_uri(files, assets).await
    }

    /// URL of the first uploaded bust file, or the bundled default image.
    pub async fn bust_uri(&self, files: &dyn FileStore, assets: &dyn AssetResolver) -> Result<String> {
        let stored = files
            .area_files(SYSTEM_CONTEXT_ID, COMPONENT, BUST_FILE_AREA, self.record.id)
            .await?;

        match stored.iter().find(|file| !file.is_placeholder()) {
            Some(file) => Ok(assets.file_url(&file.pathname())),
            None => Ok(default_uri(assets)),
        }
    }
}

pub fn default_uri(assets: &dyn AssetResolver) -> String {
    assets.image_url(DEFAULT_AVATAR_IMAGE, COMPONENT)
}

/// Avatar types offered when creating an avatar.
pub fn types(lang: Lang) -> Vec<(&'static str, String)> {
    vec![(DEFAULT_AVATAR_TYPE, get_string(lang, "avatartype_normal"))]
}
