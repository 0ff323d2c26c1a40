/// Remove markup tags from user input.
///
/// Text inside `<...>` is dropped. An unterminated tag drops the rest of the
/// input, so a dangling `<script` never survives.
pub fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;

    for ch in raw.chars() {
        match (in_tag, ch) {
            (false, '<') => in_tag = true,
            (true, '>') => in_tag = false,
            (false, other) => out.push(other),
            (true, _) => {}
        }
    }

    out
}

/// Keep at most `max_chars` characters.
pub fn truncate_chars(raw: &str, max_chars: usize) -> String {
    raw.chars().take(max_chars).collect()
}

/// Strip markup, then truncate. Used for every free-text value a user can persist.
pub fn clean_notags(raw: &str, max_chars: usize) -> String {
    truncate_chars(strip_tags(raw).trim(), max_chars)
}

#[cfg(test)]
mod tests {
    use super::{clean_notags, strip_tags, truncate_chars};

    #[test]
    fn strips_simple_markup() {
        assert_eq!(strip_tags("<b>Ace</b>"), "Ace");
        assert_eq!(strip_tags("a <i>b</i> c"), "a b c");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn unterminated_tag_drops_tail() {
        assert_eq!(strip_tags("Ace<script"), "Ace");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("ñandú", 3), "ñan");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn nickname_input_is_cleaned_and_capped() {
        let cleaned = clean_notags("<b>VeryLongNickname0123456789ABCDEF</b>", 31);
        assert_eq!(cleaned, "VeryLongNickname0123456789ABCDE");
        assert_eq!(cleaned.chars().count(), 31);
    }
}
