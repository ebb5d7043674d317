/// Hard cap on a sanitized description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c.is_whitespace() || matches!(c, ',' | '.' | '-')
}

/// Strip untrusted input down to word characters, whitespace, commas,
/// periods and hyphens, collapse runs of whitespace to single spaces, trim,
/// and cap the length.
///
/// Pure and idempotent; never fails. The caller is responsible for rejecting
/// an empty result.
pub fn sanitize(input: &str) -> String {
    let filtered: String = input.chars().filter(|c| is_allowed(*c)).collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    // Truncate on a char boundary, then drop any space the cut left behind
    // so a second pass changes nothing.
    collapsed
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect::<String>()
        .trim_end()
        .to_string()
}
