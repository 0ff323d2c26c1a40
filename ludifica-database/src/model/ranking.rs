use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub position: u32,
    pub user_id: u64,
    pub nickname: String,
    pub points: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankingScope {
    Site,
    Course(u64),
    /// Points logged since the given unix timestamp.
    Since(u64),
}

/// A player's total points, the input of the profile-field rankings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTotal {
    pub user_id: u64,
    pub points: u64,
}
