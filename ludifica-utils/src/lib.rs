/// Shared formatting helpers (token substitution, markup escaping).
pub mod formatting;
/// Name of the component every stored file and string table belongs to.
pub const COMPONENT: &str = "block_ludifica";
/// Pure parser helpers.
pub mod parse;
/// Input sanitization helpers.
pub mod text;
/// Shared time helpers.
pub mod time;
