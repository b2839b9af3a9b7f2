//! Splitting of comma-separated trip fields.
//!
//! Trips store multi-valued fields (material types, operators) as a single
//! comma-separated string such as `"A320, A330 ,B737"`. Every statistics
//! report first expands those fields into one token per element.

/// Split a comma-separated field into trimmed tokens.
///
/// Empty pieces left by stray commas (`",A320"`, `"A320,,A330"`, `"A320,"`)
/// are skipped. A field with no non-blank piece at all yields exactly one
/// empty token so the trip still shows up in the report under a blank
/// category instead of disappearing.
pub fn split_on_comma(field: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = field;

    loop {
        let (head, tail) = match rest.find(',') {
            Some(idx) => (&rest[..idx], Some(&rest[idx + 1..])),
            None => (rest, None),
        };

        let head = head.trim();
        if !head.is_empty() {
            tokens.push(head.to_string());
        }

        match tail {
            Some(tail) if !tail.trim().is_empty() => rest = tail,
            _ => break,
        }
    }

    if tokens.is_empty() {
        tokens.push(String::new());
    }

    tokens
}
