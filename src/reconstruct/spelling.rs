//! String surgery on frontend spellings.
//!
//! All functions borrow the input and return the remaining slice, trimmed at
//! the side that was cut.

use crate::ast::CvQualifiers;

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Remove `prefix` from the front of `spelling`.
///
/// With `is_identifier` set, the prefix only matches as a whole token: the
/// character following it must not continue an identifier.
pub fn remove_prefix<'a>(spelling: &'a str, prefix: &str, is_identifier: bool) -> Option<&'a str> {
    let rest = spelling.strip_prefix(prefix)?;
    if is_identifier && rest.chars().next().is_some_and(is_identifier_char) {
        return None;
    }
    Some(rest.trim_start())
}

/// Remove `suffix` from the end of `spelling`; see [`remove_prefix`].
pub fn remove_suffix<'a>(spelling: &'a str, suffix: &str, is_identifier: bool) -> Option<&'a str> {
    let rest = spelling.strip_suffix(suffix)?;
    if is_identifier && rest.chars().last().is_some_and(is_identifier_char) {
        return None;
    }
    Some(rest.trim_end())
}

/// Qualifiers written after the type, as in `int const`.
pub fn suffix_cv(spelling: &str) -> (CvQualifiers, &str) {
    qualifiers(spelling, remove_suffix)
}

/// Qualifiers written before the type, as in `const int`.
pub fn prefix_cv(spelling: &str) -> (CvQualifiers, &str) {
    qualifiers(spelling, remove_prefix)
}

fn qualifiers<'a>(
    spelling: &'a str,
    remove: fn(&'a str, &str, bool) -> Option<&'a str>,
) -> (CvQualifiers, &'a str) {
    let mut cv = CvQualifiers::empty();
    let mut rest = spelling;
    for _ in 0..2 {
        if !cv.is_const()
            && let Some(r) = remove(rest, "const", true)
        {
            cv |= CvQualifiers::CONST;
            rest = r;
        } else if !cv.is_volatile()
            && let Some(r) = remove(rest, "volatile", true)
        {
            cv |= CvQualifiers::VOLATILE;
            rest = r;
        } else {
            break;
        }
    }
    (cv, rest)
}

/// Leading and trailing qualifiers of a leaf spelling, merged.
pub fn extract_cv(spelling: &str) -> (CvQualifiers, &str) {
    let (prefix, rest) = prefix_cv(spelling.trim());
    let (suffix, rest) = suffix_cv(rest);
    (prefix.merge(suffix), rest)
}

/// Strip a C style `struct`/`class`/`union` tag keyword.
pub fn strip_elaborated_prefix(spelling: &str) -> &str {
    let mut rest = spelling;
    for keyword in ["struct", "class", "union"] {
        if let Some(r) = remove_prefix(rest, keyword, true) {
            rest = r;
        }
    }
    rest
}

/// Everything after the last scope separator.
pub fn strip_scope(spelling: &str) -> &str {
    match spelling.rfind(':') {
        Some(colon) => &spelling[colon + 1..],
        None => spelling,
    }
}

/// Ref-qualifier at the end of a member function spelling.
/// Returns `Some(is_rvalue)` when one was removed.
pub fn ref_qualifier(spelling: &str) -> (Option<bool>, &str) {
    if let Some(rest) = remove_suffix(spelling, "&&", false) {
        (Some(true), rest)
    } else if let Some(rest) = remove_suffix(spelling, "&", false) {
        (Some(false), rest)
    } else {
        (None, spelling)
    }
}
