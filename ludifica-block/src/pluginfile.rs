use sha1::{Digest, Sha1};
use tracing::debug;

use crate::CallbackMeta;
use ludifica_core::files::{FileStore, StoredFile};
use ludifica_core::{Identity, Result};
use ludifica_utils::COMPONENT;
use ludifica_utils::parse::leading_int;

pub const META: CallbackMeta = CallbackMeta {
    name: "pluginfile",
    desc: "Serve files stored in the block's file areas.",
    category: "files",
};

/// Delivery options passed through to the host when a file is sent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub force_download: bool,
    /// Browser cache lifetime in seconds; host default when unset.
    pub lifetime: Option<u64>,
    pub preview: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServedFile {
    pub file: StoredFile,
    pub content: Vec<u8>,
    pub options: SendOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServeOutcome {
    File(ServedFile),
    NotFound,
}

/// Hex SHA-1 of a full file path, the key the host file storage indexes by.
pub fn path_hash(pathname: &str) -> String {
    Sha1::digest(pathname.as_bytes())
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

/// Rebuild `/<context>/block_ludifica/<area>/<entry>/<rest>` from request arguments.
/// The first argument is the entry id; anything non-numeric there counts as 0.
pub fn request_pathname(context_id: u64, file_area: &str, args: &[String]) -> String {
    let (entry_id, rest) = match args.split_first() {
        Some((first, rest)) => (leading_int(first), rest),
        None => (0, args),
    };

    format!(
        "/{context_id}/{COMPONENT}/{file_area}/{entry_id}/{}",
        rest.join("/")
    )
}

/// Serve a file stored by this block. Missing files and directories are not found.
pub async fn serve_file(
    files: &dyn FileStore,
    identity: &Identity,
    context_id: u64,
    file_area: &str,
    args: &[String],
    options: SendOptions,
) -> Result<ServeOutcome> {
    identity.require_login()?;

    let pathname = request_pathname(context_id, file_area, args);
    let Some(file) = files.file_by_hash(&path_hash(&pathname)).await? else {
        debug!(%pathname, "requested file not found");
        return Ok(ServeOutcome::NotFound);
    };

    if file.is_directory {
        return Ok(ServeOutcome::NotFound);
    }

    let content = files.read(&file).await?;
    Ok(ServeOutcome::File(ServedFile {
        file,
        content,
        options,
    }))
}
