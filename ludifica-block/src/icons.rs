use crate::CallbackMeta;

pub const META: CallbackMeta = CallbackMeta {
    name: "get_fontawesome_icon_map",
    desc: "Font Awesome classes for the block icons.",
    category: "output",
};

/// Font Awesome classes for the block's named icons.
pub const ICON_MAP: &[(&str, &str)] = &[
    ("block_ludifica:profile", "fa-user-circle-o"),
    ("block_ludifica:topbycourse", "fa-sort-amount-asc"),
    ("block_ludifica:topbysite", "fa-trophy"),
    ("block_ludifica:lastmonth", "fa-calendar"),
    ("block_ludifica:contacts", "fa-address-card"),
    ("block_ludifica:dynamichelps", "fa-question-circle"),
    ("block_ludifica:coins", "fa-database"),
    ("block_ludifica:points", "fa-star"),
];

pub fn icon_class(name: &str) -> Option<&'static str> {
    ICON_MAP
        .iter()
        .find(|(icon, _)| *icon == name)
        .map(|(_, class)| *class)
}
