/// Replace every `{token}` listed in `pairs` with its value.
///
/// Tokens not listed are left untouched.
pub fn substitute_tokens(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (token, value) in pairs {
        let needle = format!("{{{token}}}");
        if out.contains(&needle) {
            out = out.replace(&needle, value);
        }
    }
    out
}

/// Escape text for use inside HTML attributes and element content.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{escape_html, substitute_tokens};

    #[test]
    fn substitutes_known_tokens_only() {
        assert_eq!(
            substitute_tokens("img/{name}-{level}.png", &[("name", "Fox"), ("level", "2")]),
            "img/Fox-2.png"
        );
        assert_eq!(substitute_tokens("{other}", &[("name", "Fox")]), "{other}");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
