//! Localized strings. Placeholders follow the host convention: `{$a}` for a
//! single value and `{$a->field}` for named values.

mod en;
mod es;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Es,
}

impl Lang {
    /// Accepts host language codes such as `es`, `es_co` or `en_us`.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_ascii_lowercase();
        match code.split(['_', '-']).next() {
            Some("es") => Self::Es,
            _ => Self::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => en::STRINGS,
            Self::Es => es::STRINGS,
        }
    }
}

fn lookup(lang: Lang, key: &str) -> Option<&'static str> {
    let find = |table: &'static [(&'static str, &'static str)]| {
        table
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, text)| *text)
    };

    find(lang.table()).or_else(|| find(Lang::En.table()))
}

pub fn string_exists(lang: Lang, key: &str) -> bool {
    lookup(lang, key).is_some()
}

/// Plain string. Unknown keys render as `[key]`.
pub fn get_string(lang: Lang, key: &str) -> String {
    match lookup(lang, key) {
        Some(text) => text.to_owned(),
        None => format!("[{key}]"),
    }
}

/// String with its `{$a}` placeholder replaced.
pub fn get_string_a(lang: Lang, key: &str, a: &str) -> String {
    get_string(lang, key).replace("{$a}", a)
}

/// String with `{$a->field}` placeholders replaced.
pub fn get_string_fields(lang: Lang, key: &str, fields: &[(&str, &str)]) -> String {
    let mut text = get_string(lang, key);
    for (field, value) in fields {
        text = text.replace(&format!("{{$a->{field}}}"), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{Lang, en, es, get_string, get_string_a, get_string_fields, string_exists};

    #[test]
    fn language_codes_map_to_tables() {
        assert_eq!(Lang::from_code("es_co"), Lang::Es);
        assert_eq!(Lang::from_code("ES"), Lang::Es);
        assert_eq!(Lang::from_code("en_us"), Lang::En);
        assert_eq!(Lang::from_code("fr"), Lang::En);
    }

    #[test]
    fn single_placeholder_is_substituted() {
        assert_eq!(get_string_a(Lang::Es, "nicknameunasined", "42"), "Jugador 42");
        assert_eq!(get_string_a(Lang::En, "newnickname", "Ace"), "New value for Ace");
    }

    #[test]
    fn named_placeholders_are_substituted() {
        let text = get_string_fields(
            Lang::Es,
            "overcomelevel",
            &[("maxpoints", "500"), ("name", "Apprentice")],
        );
        assert_eq!(
            text,
            "Obten <strong>500 puntos</strong> para alcanzar el nivel <strong>Apprentice</strong>."
        );
    }

    #[test]
    fn missing_keys_fall_back() {
        assert!(string_exists(Lang::Es, "nicknameunasined"));
        assert!(!string_exists(Lang::Es, "no_such_string"));
        assert_eq!(get_string(Lang::Es, "no_such_string"), "[no_such_string]");
    }

    #[test]
    fn every_spanish_key_has_an_english_entry() {
        for (key, _) in es::STRINGS {
            assert!(
                en::STRINGS.iter().any(|(name, _)| name == key),
                "missing english string {key}"
            );
        }
    }
}
