use serde::{Deserialize, Serialize};

use crate::model::points::AwardOutcome;

/// The per-user gamification record (`block_ludifica_general`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: u64,
    pub user_id: u64,
    pub nickname: String,
    pub points: u64,
    pub coins: u64,
    pub avatar_id: Option<u64>,
    /// UTC day (days since epoch) of the last counted login.
    pub streak_day: u64,
    /// Consecutive login days ending at `streak_day`.
    pub streak_days: u64,
    pub created_at: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginStreak {
    pub days: u64,
    /// False when the login happened on an already counted day.
    pub advanced: bool,
}

/// Streak change for one login, plus its award when the new streak pays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginRecord {
    pub streak: LoginStreak,
    pub award: Option<AwardOutcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinTransferOutcome {
    Transferred { sender_coins: u64 },
    InsufficientCoins,
}
