use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use crate::CallbackMeta;
use ludifica_core::lang::{Lang, get_string};
use ludifica_core::Result;
use ludifica_database::Database;
use ludifica_database::impls::instances::save_block_config;
use ludifica_database::model::instances::BlockConfig;
use ludifica_utils::formatting::escape_html;
use ludifica_utils::parse::{leading_int, parse_csv_list, parse_toggle};
use ludifica_utils::text::strip_tags;

/// Course id of the site front page.
pub const SITE_COURSE_ID: u64 = 1;

const MODULE_FIELD_PREFIX: &str = "config_points_module_";

pub const META: CallbackMeta = CallbackMeta {
    name: "edit_form",
    desc: "Block instance settings form and its submission.",
    category: "settings",
};

/// A course module that can pay points on completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseModuleInfo {
    pub id: u64,
    pub name: String,
    pub type_title: String,
    pub icon_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormElement {
    Header {
        name: String,
        label: String,
    },
    Text {
        name: String,
        label: String,
        help: Option<String>,
    },
    Select {
        name: String,
        label: String,
        options: Vec<(String, String)>,
        default: String,
        help: Option<String>,
    },
    Static {
        name: String,
        text: String,
    },
    Integer {
        name: String,
        label_html: String,
        default: u64,
        size: u32,
    },
}

impl FormElement {
    pub fn name(&self) -> &str {
        match self {
            Self::Header { name, .. }
            | Self::Text { name, .. }
            | Self::Select { name, .. }
            | Self::Static { name, .. }
            | Self::Integer { name, .. } => name,
        }
    }
}

fn yes_no(lang: Lang, name: &str, label_key: &str, with_help: bool) -> FormElement {
    FormElement::Select {
        name: format!("config_{name}"),
        label: get_string(lang, label_key),
        options: vec![
            ("0".to_owned(), get_string(lang, "no")),
            ("1".to_owned(), get_string(lang, "yes")),
        ],
        default: "1".to_owned(),
        help: with_help.then(|| get_string(lang, &format!("{label_key}_help"))),
    }
}

/// Settings form for a block instance in `course_id`.
pub fn definition(lang: Lang, course_id: u64, modules: &[CourseModuleInfo]) -> Vec<FormElement> {
    let mut form = vec![
        FormElement::Header {
            name: "configheader".to_owned(),
            label: get_string(lang, "blocksettings"),
        },
        FormElement::Text {
            name: "config_title".to_owned(),
            label: get_string(lang, "customtitle"),
            help: None,
        },
        yes_no(lang, "tabprofile", "tabprofile", true),
        yes_no(lang, "tabcontacts", "tabcontacts", true),
        yes_no(lang, "tabtopbysite", "tabtopbysite", false),
    ];

    if course_id != SITE_COURSE_ID {
        form.push(yes_no(lang, "tabtopbycourse", "tabtopbycourse", false));
    }

    form.push(yes_no(lang, "tablastmonth", "tablastmonth", false));
    form.push(yes_no(lang, "dynamichelps", "dynamichelps", false));
    form.push(FormElement::Text {
        name: "config_userfieldsranking".to_owned(),
        label: get_string(lang, "userfieldsranking"),
        help: Some(get_string(lang, "userfieldsranking_help")),
    });

    if modules.is_empty() {
        return form;
    }

    form.push(FormElement::Header {
        name: "configheader_modules".to_owned(),
        label: get_string(lang, "configheader_modules"),
    });
    form.push(FormElement::Static {
        name: "configmodules_help".to_owned(),
        text: get_string(lang, "configmodules_help"),
    });

    for module in modules {
        let type_title = escape_html(&module.type_title);
        form.push(FormElement::Integer {
            name: format!("{MODULE_FIELD_PREFIX}{}", module.id),
            label_html: format!(
                "<img src=\"{}\" alt=\"{type_title}\" title=\"{type_title}\" class=\"icon\"> {} <label>({type_title})</label>",
                escape_html(&module.icon_url),
                escape_html(&module.name),
            ),
            default: 0,
            size: 4,
        });
    }

    form
}

/// Turn submitted form values into a block configuration. Missing toggles keep
/// their defaults and non-numeric module points count as 0.
pub fn apply_submission(course_id: u64, values: &HashMap<String, String>) -> BlockConfig {
    let toggle = |name: &str| parse_toggle(values.get(name).map(String::as_str), true);

    let points_module = values
        .iter()
        .filter_map(|(name, value)| {
            let module_id = name.strip_prefix(MODULE_FIELD_PREFIX)?.parse::<u64>().ok()?;
            Some((module_id, leading_int(value).max(0).unsigned_abs()))
        })
        .collect();

    BlockConfig {
        title: values
            .get("config_title")
            .map(|title| strip_tags(title).trim().to_owned())
            .unwrap_or_default(),
        tab_profile: toggle("config_tabprofile"),
        tab_contacts: toggle("config_tabcontacts"),
        tab_top_by_site: toggle("config_tabtopbysite"),
        tab_top_by_course: (course_id != SITE_COURSE_ID).then(|| toggle("config_tabtopbycourse")),
        tab_last_month: toggle("config_tablastmonth"),
        dynamic_helps: toggle("config_dynamichelps"),
        user_fields_ranking: values
            .get("config_userfieldsranking")
            .map(|fields| parse_csv_list(fields).join(","))
            .unwrap_or_default(),
        points_module,
    }
}

/// Apply and store a submission for one block instance.
pub async fn save_submission(
    db: &Database,
    instance_id: u64,
    course_id: u64,
    values: &HashMap<String, String>,
) -> Result<BlockConfig> {
    let config = apply_submission(course_id, values);
    save_block_config(db, instance_id, course_id, &config).await?;

    info!(
        instance_id,
        course_id,
        modules = config.points_module.len(),
        "block settings saved"
    );
    Ok(config)
}
