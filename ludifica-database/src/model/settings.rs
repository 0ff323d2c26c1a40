use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVELS: &str = "Beginner|100\nApprentice|500\nAdvanced|1500\nExpert|4000\nMaster";

/// Site-wide rules for awarding points and coins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LudificaSettings {
    pub points_by_new_user: u64,
    pub points_by_recurrent_login1: u64,
    pub points_by_recurrent_login2: u64,
    /// Consecutive days needed to start a streak. Zero disables streaks.
    pub recurrent_login_days: u64,
    pub points_by_end_course: u64,
    /// Name of the course custom field holding the course duration.
    pub duration_field: String,
    /// Duration used when the course does not define one.
    pub end_course_default_time: u64,
    pub points_by_end_all_modules: bool,
    pub points_by_end_course_module: u64,
    pub points_by_change_mail: u64,
    pub email_valid_pattern: String,
    pub email_invalid_pattern: String,
    pub points_to_coins: u64,
    pub coins_by_points: u64,
    /// One level per line: `Name|maxpoints`.
    pub levels: String,
    pub default_level: u64,
    /// One network per line: `name|url template`.
    pub social_networks: String,
    pub home_url: String,
    pub use_real_information: bool,
}

impl Default for LudificaSettings {
    fn default() -> Self {
        Self {
            points_by_new_user: 10,
            points_by_recurrent_login1: 5,
            points_by_recurrent_login2: 1,
            recurrent_login_days: 3,
            points_by_end_course: 100,
            duration_field: String::new(),
            end_course_default_time: 1,
            points_by_end_all_modules: false,
            points_by_end_course_module: 5,
            points_by_change_mail: 5,
            email_valid_pattern: String::new(),
            email_invalid_pattern: String::new(),
            points_to_coins: 100,
            coins_by_points: 10,
            levels: DEFAULT_LEVELS.to_owned(),
            default_level: 0,
            social_networks: String::new(),
            home_url: String::new(),
            use_real_information: false,
        }
    }
}

impl LudificaSettings {
    /// Build settings from stored name/value rows. Missing or malformed values keep their default.
    ///
    /// Numbers must fit the ledger's `BIGINT` columns, so negatives and values
    /// past `i64::MAX` count as malformed.
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, default: u64| {
            pairs
                .get(key)
                .and_then(|value| value.trim().parse::<i64>().ok())
                .and_then(|value| u64::try_from(value).ok())
                .unwrap_or(default)
        };
        let flag = |key: &str, default: bool| match pairs.get(key).map(|v| v.trim()) {
            Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            _ => default,
        };
        let text = |key: &str, default: &str| {
            pairs
                .get(key)
                .cloned()
                .unwrap_or_else(|| default.to_owned())
        };

        Self {
            points_by_new_user: number("pointsbynewuser", defaults.points_by_new_user),
            points_by_recurrent_login1: number(
                "pointsbyrecurrentlogin1",
                defaults.points_by_recurrent_login1,
            ),
            points_by_recurrent_login2: number(
                "pointsbyrecurrentlogin2",
                defaults.points_by_recurrent_login2,
            ),
            recurrent_login_days: number("recurrentlogindays", defaults.recurrent_login_days),
            points_by_end_course: number("pointsbyendcourse", defaults.points_by_end_course),
            duration_field: text("durationfield", &defaults.duration_field),
            end_course_default_time: number(
                "endcoursedefaulttime",
                defaults.end_course_default_time,
            ),
            points_by_end_all_modules: flag(
                "pointsbyendallmodules",
                defaults.points_by_end_all_modules,
            ),
            points_by_end_course_module: number(
                "pointsbyendcoursemodule",
                defaults.points_by_end_course_module,
            ),
            points_by_change_mail: number("pointsbychangemail", defaults.points_by_change_mail),
            email_valid_pattern: text("emailvalidpattern", &defaults.email_valid_pattern),
            email_invalid_pattern: text("emailinvalidpattern", &defaults.email_invalid_pattern),
            points_to_coins: number("pointstocoins", defaults.points_to_coins),
            coins_by_points: number("coinsbypoints", defaults.coins_by_points),
            levels: text("levels", &defaults.levels),
            default_level: number("defaultlevel", defaults.default_level),
            social_networks: text("socialnetworks", &defaults.social_networks),
            home_url: text("homeurl", &defaults.home_url),
            use_real_information: flag("userealinformation", defaults.use_real_information),
        }
    }
}
