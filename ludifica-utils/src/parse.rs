/// Parse the leading integer of a path argument the way the host casts request
/// segments: optional sign, then digits; anything else yields 0.
pub fn leading_int(raw: &str) -> i64 {
    let value = raw.trim_start();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let end = digits
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(digits.len(), |(idx, _)| idx);

    let Ok(number) = digits[..end].parse::<i64>() else {
        return 0;
    };

    if negative { -number } else { number }
}

/// Split a multi-line setting into trimmed `name|value` pairs.
///
/// Blank lines are skipped. A line without `|` yields `None` as value.
pub fn parse_pipe_lines(raw: &str) -> Vec<(String, Option<String>)> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('|') {
            Some((name, value)) => {
                let value = value.trim();
                (
                    name.trim().to_owned(),
                    (!value.is_empty()).then(|| value.to_owned()),
                )
            }
            None => (line.to_owned(), None),
        })
        .collect()
}

/// Parse a comma separated list, dropping empty entries.
pub fn parse_csv_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Parse a yes/no form value. Unknown input falls back to `default`.
pub fn parse_toggle(raw: Option<&str>, default: bool) -> bool {
    match raw.map(|value| value.trim().to_ascii_lowercase()) {
        Some(value) => match value.as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
