use serde::{Deserialize, Serialize};

/// Extra issuing rule attached to a host badge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BadgeCriteria {
    /// Issue once the user has completed `n` courses.
    Ncourses { n: u64 },
}

impl BadgeCriteria {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Ncourses { .. } => "ncourses",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeCriteriaRecord {
    pub badge_id: u64,
    pub criteria: BadgeCriteria,
    pub updated_at: u64,
}
