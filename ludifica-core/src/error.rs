use crate::lang::{Lang, get_string};

/// Failure kinds surfaced to the host. Every domain variant carries the
/// string-table key of its user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(&'static str),

    #[error("conflict: {0}")]
    Conflict(&'static str),

    #[error("forbidden: {0}")]
    Forbidden(&'static str),

    #[error("validation failed: {0}")]
    Validation(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// String-table key for domain errors; `None` for internal failures.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::NotFound(key)
            | Self::Conflict(key)
            | Self::Forbidden(key)
            | Self::Validation(key) => Some(key),
            Self::Internal(_) => None,
        }
    }

    /// Message safe to show to the acting user. Internal details stay in the logs.
    pub fn localized(&self, lang: Lang) -> String {
        get_string(lang, self.key().unwrap_or("generalexceptionmessage"))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }
}
