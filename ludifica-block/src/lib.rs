pub mod avatar;
pub mod edit_form;
pub mod help;
pub mod icons;
pub mod levels;
pub mod nickname;
pub mod pluginfile;
pub mod points;
pub mod profile;
pub mod ranking;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

/// A host entry point implemented by this block.
pub struct CallbackMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
}

pub const CALLBACKS: &[CallbackMeta] = &[
    nickname::META,
    pluginfile::META,
    edit_form::META,
    icons::META,
    points::META,
];

pub fn callback(name: &str) -> Option<&'static CallbackMeta> {
    CALLBACKS.iter().find(|meta| meta.name == name)
}

#[cfg(test)]
mod tests {
    use super::{CALLBACKS, callback};

    #[test]
    fn callback_names_are_unique() {
        let mut names: Vec<_> = CALLBACKS.iter().map(|meta| meta.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CALLBACKS.len());
        assert!(callback("inplace_editable").is_some());
    }
}
