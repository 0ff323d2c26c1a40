use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Values of the block settings form for one block instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    pub title: String,
    pub tab_profile: bool,
    pub tab_contacts: bool,
    pub tab_top_by_site: bool,
    /// Absent when the block lives on the site course.
    pub tab_top_by_course: Option<bool>,
    pub tab_last_month: bool,
    pub dynamic_helps: bool,
    pub user_fields_ranking: String,
    /// Points paid for completing each course module, keyed by course-module id.
    pub points_module: BTreeMap<u64, u64>,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            tab_profile: true,
            tab_contacts: true,
            tab_top_by_site: true,
            tab_top_by_course: None,
            tab_last_month: true,
            dynamic_helps: true,
            user_fields_ranking: String::new(),
            points_module: BTreeMap::new(),
        }
    }
}

impl BlockConfig {
    /// Points configured for a course module; unconfigured modules pay nothing.
    pub fn module_points(&self, course_module_id: u64) -> u64 {
        self.points_module
            .get(&course_module_id)
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInstance {
    pub instance_id: u64,
    pub course_id: u64,
    pub config: BlockConfig,
    pub updated_at: u64,
}
