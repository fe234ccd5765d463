//! Re-serialization of a merged entry list into its output forms.

use indexmap::IndexMap;

use crate::types::{CustomList, Direction, SortEntry};

/// Canonical `!`-separated encoding of an entry list.
///
/// Inverts the sort tokenizer for well-formed input, so a round trip
/// through [`parse_sort`](crate::parse_sort) reproduces the string.
///
/// # Examples
///
/// ```
/// use sortq::{SortEntry, sort_string};
///
/// let entries = [SortEntry::desc("email"), SortEntry::asc("phone")];
/// assert_eq!(sort_string(&entries), "email_desc!phone_asc");
/// ```
#[must_use]
pub fn sort_string(entries: &[SortEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}_{}", entry.field, entry.direction))
        .collect::<Vec<_>>()
        .join("!")
}

/// Insertion-ordered field-to-direction mapping.
///
/// Later entries with a duplicate field overwrite earlier values in place,
/// keeping the original position, so the primary sort key stays first.
#[must_use]
pub fn mapping(entries: &[SortEntry]) -> IndexMap<String, Direction> {
    let mut map = IndexMap::new();
    for entry in entries {
        map.insert(entry.field.clone(), entry.direction);
    }
    map
}

/// Render an ORDER BY clause fragment.
///
/// For each entry the custom table is consulted first; a registered
/// fragment is emitted verbatim (trusted, caller-authored SQL) with no
/// quoting applied. Otherwise the field is split on `.`, each segment is
/// quoted independently through `quoter`, the segments are rejoined with
/// `.`, and the uppercased direction is appended. Fragments are joined
/// with `", "`.
///
/// Field identifiers reaching this function have already been constrained
/// to the tokenizer's character set, so no raw input can carry SQL
/// metacharacters; the quoting function additionally wraps each segment per
/// the target system's convention so reserved words and mixed case are
/// handled safely. Pass an identity closure when no quoting is wanted.
///
/// # Examples
///
/// ```
/// use sortq::{CustomList, SortEntry, order_clause};
///
/// let entries = [SortEntry::desc("users.name")];
/// let clause = order_clause(&entries, |frag| format!("`{frag}`"), &CustomList::new());
/// assert_eq!(clause, "`users`.`name` DESC");
/// ```
pub fn order_clause<F>(entries: &[SortEntry], quoter: F, custom: &CustomList) -> String
where
    F: Fn(&str) -> String,
{
    entries
        .iter()
        .map(|entry| {
            if let Some(fragment) = custom.fragment_for(entry) {
                return fragment.to_string();
            }
            let column = entry
                .field
                .split('.')
                .map(|segment| quoter(segment))
                .collect::<Vec<_>>()
                .join(".");
            format!("{column} {}", entry.direction.as_sql())
        })
        .collect::<Vec<_>>()
        .join(", ")
}
