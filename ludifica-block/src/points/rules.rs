use std::collections::HashMap;

use regex::Regex;

use ludifica_database::model::badges::{BadgeCriteria, BadgeCriteriaRecord};
use ludifica_database::model::instances::BlockConfig;
use ludifica_database::model::settings::LudificaSettings;
use ludifica_utils::parse::leading_int;

/// Points for a login that brought the streak to `streak_days`.
pub fn login_points(streak_days: u64, settings: &LudificaSettings) -> u64 {
    let required = settings.recurrent_login_days;
    if required == 0 || streak_days < required {
        0
    } else if streak_days == required {
        settings.points_by_recurrent_login1
    } else {
        settings.points_by_recurrent_login2
    }
}

/// Course duration from its custom field, or the configured default.
pub fn course_duration(settings: &LudificaSettings, custom_fields: &HashMap<String, String>) -> u64 {
    let field = settings.duration_field.trim();
    let duration = custom_fields
        .get(field)
        .map(|value| leading_int(value))
        .filter(|value| *value > 0)
        .map(i64::unsigned_abs);

    duration.unwrap_or(settings.end_course_default_time)
}

/// Points for completing a course, scaled by duration when a duration field is set.
pub fn course_points(settings: &LudificaSettings, custom_fields: &HashMap<String, String>) -> u64 {
    if settings.duration_field.trim().is_empty() {
        settings.points_by_end_course
    } else {
        settings
            .points_by_end_course
            .saturating_mul(course_duration(settings, custom_fields))
    }
}

/// Points for completing a course module, from the site rule or the course block.
pub fn module_points(
    settings: &LudificaSettings,
    config: Option<&BlockConfig>,
    course_module_id: u64,
) -> u64 {
    if settings.points_by_end_all_modules {
        return settings.points_by_end_course_module;
    }

    config.map_or(0, |config| config.module_points(course_module_id))
}

/// Site rules an email must pass to earn the email-change award.
#[derive(Clone, Debug)]
pub struct EmailRules {
    valid: Option<Regex>,
    invalid: Option<Regex>,
}

impl EmailRules {
    pub fn compile(settings: &LudificaSettings) -> Result<Self, regex::Error> {
        let compile = |pattern: &str| {
            let pattern = pattern.trim();
            (!pattern.is_empty()).then(|| Regex::new(pattern)).transpose()
        };

        Ok(Self {
            valid: compile(&settings.email_valid_pattern)?,
            invalid: compile(&settings.email_invalid_pattern)?,
        })
    }

    pub fn accepts(&self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() {
            return false;
        }

        self.valid.as_ref().is_none_or(|valid| valid.is_match(email))
            && self.invalid.as_ref().is_none_or(|invalid| !invalid.is_match(email))
    }
}

/// Badges whose criteria are met by `completed_courses`.
pub fn met_badges(completed_courses: u64, pending: &[BadgeCriteriaRecord]) -> Vec<u64> {
    pending
        .iter()
        .filter(|record| match record.criteria {
            BadgeCriteria::Ncourses { n } => n > 0 && completed_courses >= n,
        })
        .map(|record| record.badge_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::{EmailRules, course_points, login_points, met_badges, module_points};
    use ludifica_database::model::badges::{BadgeCriteria, BadgeCriteriaRecord};
    use ludifica_database::model::instances::BlockConfig;
    use ludifica_database::model::settings::LudificaSettings;

    fn settings() -> LudificaSettings {
        LudificaSettings {
            recurrent_login_days: 3,
            points_by_recurrent_login1: 5,
            points_by_recurrent_login2: 1,
            points_by_end_course: 100,
            ..LudificaSettings::default()
        }
    }

    #[test]
    fn streak_pays_once_reached_then_daily() {
        let settings = settings();
        assert_eq!(login_points(1, &settings), 0);
        assert_eq!(login_points(2, &settings), 0);
        assert_eq!(login_points(3, &settings), 5);
        assert_eq!(login_points(4, &settings), 1);
        assert_eq!(login_points(30, &settings), 1);
    }

    #[test]
    fn zero_streak_days_disables_login_points() {
        let settings = LudificaSettings {
            recurrent_login_days: 0,
            ..settings()
        };
        assert_eq!(login_points(10, &settings), 0);
    }

    #[test]
    fn course_points_scale_with_duration_field() {
        let mut fields = HashMap::new();
        assert_eq!(course_points(&settings(), &fields), 100);

        let by_duration = LudificaSettings {
            duration_field: "hours".to_owned(),
            end_course_default_time: 2,
            ..settings()
        };
        assert_eq!(course_points(&by_duration, &fields), 200);

        fields.insert("hours".to_owned(), "40".to_owned());
        assert_eq!(course_points(&by_duration, &fields), 4000);

        fields.insert("hours".to_owned(), "none".to_owned());
        assert_eq!(course_points(&by_duration, &fields), 200);
    }

    #[test]
    fn module_points_prefer_site_rule_when_all_modules_pay() {
        let config = BlockConfig {
            points_module: BTreeMap::from([(12, 7)]),
            ..BlockConfig::default()
        };
        let per_course = settings();
        assert_eq!(module_points(&per_course, Some(&config), 12), 7);
        assert_eq!(module_points(&per_course, Some(&config), 13), 0);
        assert_eq!(module_points(&per_course, None, 12), 0);

        let all_modules = LudificaSettings {
            points_by_end_all_modules: true,
            points_by_end_course_module: 4,
            ..settings()
        };
        assert_eq!(module_points(&all_modules, Some(&config), 12), 4);
    }

    #[test]
    fn email_rules_combine_valid_and_invalid_patterns() {
        let open = EmailRules::compile(&settings()).expect("rules");
        assert!(open.accepts("ada@example.org"));
        assert!(!open.accepts("  "));

        let strict = EmailRules::compile(&LudificaSettings {
            email_valid_pattern: r"@([^@]*\.)?(school\.edu)$".to_owned(),
            email_invalid_pattern: r"^test".to_owned(),
            ..settings()
        })
        .expect("rules");
        assert!(strict.accepts("ada@cs.school.edu"));
        assert!(!strict.accepts("ada@gmail.com"));
        assert!(!strict.accepts("test@school.edu"));
    }

    #[test]
    fn broken_pattern_fails_to_compile() {
        let broken = LudificaSettings {
            email_invalid_pattern: "([".to_owned(),
            ..settings()
        };
        assert!(EmailRules::compile(&broken).is_err());
    }

    #[test]
    fn badges_require_enough_completed_courses() {
        let pending = vec![
            BadgeCriteriaRecord {
                badge_id: 1,
                criteria: BadgeCriteria::Ncourses { n: 2 },
                updated_at: 0,
            },
            BadgeCriteriaRecord {
                badge_id: 2,
                criteria: BadgeCriteria::Ncourses { n: 5 },
                updated_at: 0,
            },
        ];
        assert!(met_badges(1, &pending).is_empty());
        assert_eq!(met_badges(2, &pending), vec![1]);
        assert_eq!(met_badges(9, &pending), vec![1, 2]);
    }
}
