use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR_TYPE: &str = "normal";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarRecord {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub avatar_type: String,
    /// Newline separated image URIs, one per level.
    pub sources: String,
    pub cost: u64,
    pub enabled: bool,
    pub created_at: u64,
}

pub struct NewAvatar<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub sources: &'a str,
    pub cost: u64,
    pub enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AvatarPurchaseOutcome {
    Bought { coins_left: u64 },
    AlreadyOwned,
    NotAvailable,
    InsufficientCoins,
}
