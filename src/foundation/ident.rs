/// Prefix applied to identifiers that would otherwise be empty or start with a digit.
pub const IDENT_PREFIX: &str = "component_";

/// Turn an arbitrary node label into a valid source identifier.
///
/// Every character other than an ASCII letter, ASCII digit or `_` is dropped. If nothing is left,
/// or the remainder starts with a digit, the result is prefixed with [`IDENT_PREFIX`]. The output
/// always matches `^[A-Za-z_][A-Za-z0-9_]*$`.
///
/// Distinct labels may sanitize to the same identifier (`"a b"` and `"ab"`); callers that care
/// must detect that themselves.
pub fn sanitize(label: &str) -> String {
    let kept: String = label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match kept.chars().next() {
        None => IDENT_PREFIX.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{IDENT_PREFIX}{kept}"),
        Some(_) => kept,
    }
}

/// Whether `s` is already a valid identifier in the sanitizer's output alphabet.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Make free text safe to place on a single comment line.
///
/// Control characters and every whitespace character other than a plain space become spaces, so
/// a label cannot terminate the comment and inject code. This covers U+2028 and U+2029, which
/// JavaScript treats as line terminators.
pub fn comment_safe(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_control() || (c.is_whitespace() && c != ' ') {
                ' '
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/ident.rs"]
mod tests;
