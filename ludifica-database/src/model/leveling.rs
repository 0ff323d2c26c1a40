use serde::{Deserialize, Serialize};

/// One tier of the level ladder. The last tier may have no ceiling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub max_points: Option<u64>,
}

/// Where a player stands on the level ladder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub index: usize,
    pub name: String,
    pub points: u64,
    pub next: Option<NextLevel>,
}

/// The tier after the current one and the total points that unlock it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextLevel {
    pub name: String,
    pub points_required: u64,
}
