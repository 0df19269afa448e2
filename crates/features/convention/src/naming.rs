//! # Naming Convention Parser
//!
//! Identifier segmentation and the string surgery used to turn method and type names
//! into route segments.
//!
//! ## Word boundaries
//!
//! An identifier is cut into words at every character position `i` where
//!
//! * (a) `s[i]` is upper case and `s[i + 1]` is lower case, or
//! * (b) `s[i - 1]` is lower case and `s[i]` is upper case.
//!
//! A boundary at position `0` produces an empty first word, so Pascal-case names
//! (`"GetUser"` → `["", "Get", "User"]`) carry a leading empty token while camel-case
//! names (`"getUser"` → `["get", "User"]`) do not. [`leading_word`] relies on exactly
//! this shape: it takes the second token for Pascal case and the first for camel case.
//!
//! All lengths are counted in characters, not bytes.

use crate::error::ConventionError;

/// Splits `identifier` at the case boundaries described in the module docs.
///
/// Identifiers of at most one character are returned as a single token.
#[must_use]
pub fn split_words(identifier: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = identifier.char_indices().collect();
    if chars.len() <= 1 {
        return vec![identifier];
    }

    let mut words = Vec::new();
    let mut start = 0;
    for (i, &(offset, c)) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            continue;
        }
        let next_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
        let prev_lower = i > 0 && chars[i - 1].1.is_lowercase();
        if next_lower || prev_lower {
            words.push(&identifier[start..offset]);
            start = offset;
        }
    }
    words.push(&identifier[start..]);
    words
}

/// The first semantic word of an identifier.
///
/// Pascal case (first character in `A..=Z`) yields the second token of
/// [`split_words`], camel case the first. A split producing fewer tokens than needed
/// returns the identifier unchanged, as does any identifier of length one or zero.
#[must_use]
pub fn leading_word(identifier: &str) -> &str {
    let mut chars = identifier.chars();
    let Some(first) = chars.next() else {
        return identifier;
    };
    if chars.next().is_none() {
        return identifier;
    }

    let words = split_words(identifier);
    let index = usize::from(first.is_ascii_uppercase());
    words.get(index).copied().unwrap_or(identifier)
}

/// Removes the first postfix (in list order) that `name` ends with.
///
/// # Errors
/// Returns [`ConventionError::InvalidInput`] only if the computed length is out of
/// range, which cannot happen for a matched postfix.
pub fn strip_postfix<'a, S: AsRef<str>>(
    name: &'a str,
    postfixes: &[S],
) -> Result<&'a str, ConventionError> {
    if name.is_empty() {
        return Ok(name);
    }

    match postfixes.iter().map(AsRef::as_ref).find(|postfix| name.ends_with(postfix)) {
        Some(postfix) => left(name, char_len(name) - char_len(postfix)),
        None => Ok(name),
    }
}

/// The first `len` characters of `s`.
///
/// # Errors
/// Returns [`ConventionError::InvalidInput`] if `len` exceeds the length of `s`.
pub fn left(s: &str, len: usize) -> Result<&str, ConventionError> {
    ensure_fits(s, len)?;
    Ok(&s[..byte_offset(s, len)])
}

/// The last `len` characters of `s`.
///
/// # Errors
/// Returns [`ConventionError::InvalidInput`] if `len` exceeds the length of `s`.
pub fn right(s: &str, len: usize) -> Result<&str, ConventionError> {
    let total = ensure_fits(s, len)?;
    Ok(&s[byte_offset(s, total - len)..])
}

/// Rejects empty or blank identifiers.
///
/// # Errors
/// Returns [`ConventionError::InvalidInput`] naming `what` when `identifier` is blank.
pub fn require_identifier<'a>(identifier: &'a str, what: &str) -> Result<&'a str, ConventionError> {
    if identifier.trim().is_empty() {
        return Err(ConventionError::invalid_input(format!("{what} must not be empty")));
    }
    Ok(identifier)
}

fn ensure_fits(s: &str, len: usize) -> Result<usize, ConventionError> {
    let total = char_len(s);
    if len > total {
        return Err(ConventionError::invalid_input(format!(
            "length {len} exceeds identifier '{s}' of length {total}"
        )));
    }
    Ok(total)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(offset, _)| offset)
}
