use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a points log entry was written. Stored as text in `award_type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardType {
    UserCreated,
    RecurrentLogin,
    CourseCompleted,
    ModuleCompleted,
    EmailChanged,
}

impl AwardType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UserCreated => "user_created",
            Self::RecurrentLogin => "recurrent_login",
            Self::CourseCompleted => "course_completed",
            Self::ModuleCompleted => "module_completed",
            Self::EmailChanged => "email_changed",
        }
    }
}

impl fmt::Display for AwardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AwardType {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "user_created" => Ok(Self::UserCreated),
            "recurrent_login" => Ok(Self::RecurrentLogin),
            "course_completed" => Ok(Self::CourseCompleted),
            "module_completed" => Ok(Self::ModuleCompleted),
            "email_changed" => Ok(Self::EmailChanged),
            other => Err(anyhow::anyhow!("unknown award type `{other}`")),
        }
    }
}

/// A points award. `(user_id, award_type, object_id)` identifies it, so
/// replaying the same platform event never pays twice.
#[derive(Clone, Copy, Debug)]
pub struct NewAward {
    pub user_id: u64,
    pub course_id: u64,
    pub award_type: AwardType,
    pub object_id: u64,
    pub points: u64,
}

/// Points-to-coins exchange rule: every `points_to_coins` points earned pay
/// `coins_by_points` coins. A zero threshold disables coins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoinConversion {
    pub points_to_coins: u64,
    pub coins_by_points: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AwardOutcome {
    Awarded {
        points: u64,
        coins: u64,
        total_points: u64,
        total_coins: u64,
    },
    Duplicate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointsLogEntry {
    pub id: u64,
    pub user_id: u64,
    pub course_id: u64,
    pub award_type: AwardType,
    pub object_id: u64,
    pub points: u64,
    pub created_at: u64,
}
