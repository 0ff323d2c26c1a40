use std::collections::HashMap;

use serde::Serialize;

use crate::edit_form::{CourseModuleInfo, SITE_COURSE_ID};
use crate::points::rules::course_duration;
use ludifica_core::lang::{Lang, get_string, get_string_a};
use ludifica_database::model::instances::BlockConfig;
use ludifica_database::model::settings::LudificaSettings;

/// What the help tab knows about the course it is shown in.
#[derive(Clone, Copy, Debug)]
pub struct CourseContext<'a> {
    pub course_id: u64,
    pub custom_fields: &'a HashMap<String, String>,
    pub config: Option<&'a BlockConfig>,
    pub modules: &'a [CourseModuleInfo],
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DynamicHelp {
    pub title: String,
    pub items: Vec<String>,
    /// Per-module points, present when the course pays for specific modules.
    pub modules: Option<ModuleHelp>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModuleHelp {
    pub title: String,
    pub lines: Vec<String>,
}

/// Help lines describing how points are earned here.
pub fn dynamic_help(lang: Lang, settings: &LudificaSettings, course: &CourseContext<'_>) -> DynamicHelp {
    let mut help = DynamicHelp {
        title: get_string(lang, "dynamic_help_title"),
        ..DynamicHelp::default()
    };

    if settings.recurrent_login_days > 0 {
        let mut line = get_string_a(
            lang,
            "dynamic_help-recurrentlogindays",
            &settings.recurrent_login_days.to_string(),
        );
        line.push_str(&get_string_a(
            lang,
            "dynamic_help-pointsrecurrentlogin",
            &settings.points_by_recurrent_login1.to_string(),
        ));
        help.items.push(line);

        if settings.points_by_recurrent_login2 > 0 {
            help.items.push(get_string_a(
                lang,
                "dynamic_help-pointsbyday",
                &settings.points_by_recurrent_login2.to_string(),
            ));
        }
    }

    if settings.points_by_end_course > 0 {
        let by_duration = !settings.duration_field.trim().is_empty();
        help.items.push(if !by_duration {
            get_string_a(
                lang,
                "dynamic_help-pointsbyendcourse",
                &settings.points_by_end_course.to_string(),
            )
        } else if course.course_id == SITE_COURSE_ID {
            get_string_a(
                lang,
                "dynamic_help-pointsbyendcourseduration_site",
                &settings.points_by_end_course.to_string(),
            )
        } else {
            let points = settings
                .points_by_end_course
                .saturating_mul(course_duration(settings, course.custom_fields));
            get_string_a(lang, "dynamic_help-pointsbyendcourseduration", &points.to_string())
        });
    }

    if settings.points_by_end_all_modules {
        if settings.points_by_end_course_module > 0 {
            help.items.push(get_string_a(
                lang,
                "dynamic_help-pointsbyendmodule",
                &settings.points_by_end_course_module.to_string(),
            ));
        }
    } else if course.course_id != SITE_COURSE_ID {
        help.modules = Some(module_help(lang, course));
    }

    if settings.points_to_coins > 0 && settings.coins_by_points > 0 {
        let mut line = get_string_a(
            lang,
            "dynamic_help-pointstocoins",
            &settings.points_to_coins.to_string(),
        );
        line.push_str(&get_string_a(
            lang,
            "dynamic_help-coinsbypoints",
            &settings.coins_by_points.to_string(),
        ));
        help.items.push(line);
    }

    help
}

fn module_help(lang: Lang, course: &CourseContext<'_>) -> ModuleHelp {
    let lines: Vec<String> = course
        .modules
        .iter()
        .filter_map(|module| {
            let points = course.config?.module_points(module.id);
            (points > 0).then(|| {
                format!(
                    "{}: {}",
                    module.name,
                    get_string_a(lang, "dynamic_help-pointsbymodule", &points.to_string())
                )
            })
        })
        .collect();

    if lines.is_empty() {
        ModuleHelp {
            title: get_string(lang, "dynamic_help-noactivities"),
            lines,
        }
    } else {
        ModuleHelp {
            title: get_string(lang, "helptitle_pointsbycoursemodule"),
            lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use super::{CourseContext, dynamic_help};
    use crate::edit_form::CourseModuleInfo;
    use ludifica_core::lang::Lang;
    use ludifica_database::model::instances::BlockConfig;
    use ludifica_database::model::settings::LudificaSettings;

    fn modules() -> Vec<CourseModuleInfo> {
        vec![
            CourseModuleInfo {
                id: 31,
                name: "Final quiz".to_owned(),
                type_title: "Quiz".to_owned(),
                icon_url: String::new(),
            },
            CourseModuleInfo {
                id: 32,
                name: "Reading".to_owned(),
                type_title: "Page".to_owned(),
                icon_url: String::new(),
            },
        ]
    }

    #[test]
    fn default_settings_describe_login_course_and_coins() {
        let fields = HashMap::new();
        let course = CourseContext {
            course_id: 1,
            custom_fields: &fields,
            config: None,
            modules: &[],
        };
        let help = dynamic_help(Lang::En, &LudificaSettings::default(), &course);

        assert_eq!(help.title, "Get points for the following criteria");
        assert_eq!(
            help.items[0],
            "Log in for <strong>3 days</strong> to start a streak and earn <strong>5 points</strong>."
        );
        assert!(help.items.iter().any(|line| line.contains("completing a course")));
        assert!(help.items.last().is_some_and(|line| line.ends_with("<strong>10 coins</strong>.")));
        assert!(help.modules.is_none());
    }

    #[test]
    fn duration_based_course_points_use_course_field() {
        let settings = LudificaSettings {
            duration_field: "hours".to_owned(),
            ..LudificaSettings::default()
        };
        let fields = HashMap::from([("hours".to_owned(), "3".to_owned())]);
        let course = CourseContext {
            course_id: 8,
            custom_fields: &fields,
            config: None,
            modules: &[],
        };
        let help = dynamic_help(Lang::En, &settings, &course);
        assert!(help.items.iter().any(|line| line.contains("<strong>300 points</strong>")));
    }

    #[test]
    fn course_modules_with_points_are_listed() {
        let fields = HashMap::new();
        let modules = modules();
        let config = BlockConfig {
            points_module: BTreeMap::from([(31, 20)]),
            ..BlockConfig::default()
        };
        let course = CourseContext {
            course_id: 8,
            custom_fields: &fields,
            config: Some(&config),
            modules: &modules,
        };

        let help = dynamic_help(Lang::En, &LudificaSettings::default(), &course);
        let module_help = help.modules.expect("module help");
        assert_eq!(module_help.lines, vec!["Final quiz: 20 points"]);
    }

    #[test]
    fn course_without_paying_modules_says_so() {
        let fields = HashMap::new();
        let modules = modules();
        let course = CourseContext {
            course_id: 8,
            custom_fields: &fields,
            config: None,
            modules: &modules,
        };

        let help = dynamic_help(Lang::Es, &LudificaSettings::default(), &course);
        let module_help = help.modules.expect("module help");
        assert!(module_help.lines.is_empty());
        assert_eq!(
            module_help.title,
            "No hay actividades que asignen puntos en este curso."
        );
    }
}
