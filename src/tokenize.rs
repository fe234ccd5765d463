//! Tokenizers for the two sort mini-grammars.
//!
//! Two encodings of the same thing are accepted:
//!
//! | Grammar | Example | Shape |
//! |---------|---------|-------|
//! | Sort string | `"email_desc!name_asc"` | `!`-separated `<field>_<asc\|desc>` tokens |
//! | Order string | `"email ASC, phone"` | `,`-separated `<field> [ASC\|DESC]` tokens |
//!
//! Fields are built from ASCII letters, digits, underscores and dots, so a
//! token can name a qualified column (`users.name`). Direction words match
//! case-insensitively and are normalized to lowercase; an order token with
//! no direction defaults to ascending.
//!
//! Malformed segments never fail the parse: they are dropped, and anything
//! that does not match the grammar (injection payloads included) can never
//! reach the renderer. The [`tokenize_sort`]/[`tokenize_order`] variants
//! additionally report what was dropped for diagnostics.

use crate::types::{Direction, SortEntry};

/// Tokenizer output: recognized entries plus the raw segments that matched
/// neither grammar rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Entries recognized by the grammar, in input order.
    pub entries: Vec<SortEntry>,
    /// Non-empty segments the grammar rejected, in input order.
    pub skipped: Vec<String>,
}

/// Validate that a string is a legal sort field identifier.
///
/// A legal field is non-empty and contains only ASCII letters, digits,
/// underscores and dots. This is the sole character set the tokenizers
/// accept, which is what keeps SQL metacharacters out of rendered output.
///
/// # Examples
///
/// ```
/// use sortq::is_valid_sort_field;
///
/// assert!(is_valid_sort_field("email"));
/// assert!(is_valid_sort_field("users.name"));
/// assert!(is_valid_sort_field("users_300.name_5"));
///
/// assert!(!is_valid_sort_field(""));
/// assert!(!is_valid_sort_field("name; DROP TABLE users"));
/// assert!(!is_valid_sort_field("count(*)"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sort_field(field: &str) -> bool {
    !field.is_empty()
        && field
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}

/// Tokenize a compact sort string (`"email_desc!name_asc"`).
///
/// Splits on `!` and matches each segment against the sort grammar. Empty
/// segments are ignored; malformed ones are collected into
/// [`Tokenized::skipped`].
#[must_use]
pub fn tokenize_sort(raw: &str) -> Tokenized {
    let mut out = Tokenized::default();
    for segment in raw.split('!') {
        if segment.is_empty() {
            continue;
        }
        match sort_token(segment) {
            Some(entry) => out.entries.push(entry),
            None => out.skipped.push(segment.to_string()),
        }
    }
    out
}

/// Tokenize a SQL-style order string (`"email ASC, phone ASC, name DESC"`).
///
/// Splits on `,` and matches each trimmed segment against the order
/// grammar. Empty segments are ignored; malformed ones are collected into
/// [`Tokenized::skipped`].
#[must_use]
pub fn tokenize_order(raw: &str) -> Tokenized {
    let mut out = Tokenized::default();
    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match order_token(segment) {
            Some(entry) => out.entries.push(entry),
            None => out.skipped.push(segment.to_string()),
        }
    }
    out
}

/// Tokenize a sort string, keeping only the recognized entries.
///
/// # Examples
///
/// ```
/// use sortq::{SortEntry, parse_sort};
///
/// assert_eq!(
///     parse_sort("email_desc!name_asc"),
///     vec![SortEntry::desc("email"), SortEntry::asc("name")]
/// );
/// assert_eq!(parse_sort("(SELECT 1)_asc"), vec![]);
/// ```
#[must_use]
pub fn parse_sort(raw: &str) -> Vec<SortEntry> {
    tokenize_sort(raw).entries
}

/// Tokenize an order string, keeping only the recognized entries.
///
/// # Examples
///
/// ```
/// use sortq::{SortEntry, parse_order};
///
/// assert_eq!(
///     parse_order("email ASC, phone"),
///     vec![SortEntry::asc("email"), SortEntry::asc("phone")]
/// );
/// ```
#[must_use]
pub fn parse_order(raw: &str) -> Vec<SortEntry> {
    tokenize_order(raw).entries
}

/// Match one whole segment against `<field>_<asc|desc>`.
fn sort_token(segment: &str) -> Option<SortEntry> {
    let (field, direction) = split_direction_suffix(segment)?;
    is_valid_sort_field(field).then(|| SortEntry::new(field, direction))
}

/// Match one whole segment against `<field>` or `<field> <direction>`.
fn order_token(segment: &str) -> Option<SortEntry> {
    let mut words = segment.split_whitespace();
    let field = words.next()?;
    let direction = match words.next() {
        None => Direction::Asc,
        Some(word) => Direction::parse(word)?,
    };
    if words.next().is_some() {
        return None;
    }
    is_valid_sort_field(field).then(|| SortEntry::new(field, direction))
}

/// Split a trailing `_asc`/`_desc` suffix (case-insensitive) off a segment,
/// leaving a non-empty field.
fn split_direction_suffix(segment: &str) -> Option<(&str, Direction)> {
    if let Some(field) = strip_suffix_ignore_case(segment, "_asc") {
        return Some((field, Direction::Asc));
    }
    if let Some(field) = strip_suffix_ignore_case(segment, "_desc") {
        return Some((field, Direction::Desc));
    }
    None
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    if s.len() <= suffix.len() {
        return None;
    }
    let (head, tail) = s.split_at_checked(s.len() - suffix.len())?;
    tail.eq_ignore_ascii_case(suffix).then_some(head)
}
