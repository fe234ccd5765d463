//! Whitelist construction and filtering for permitted sort fields.
//!
//! A whitelist is built from a mix of literal field names and table
//! descriptors. Descriptors expand to their qualified `table.column` forms
//! and, for convenience, to bare column names — except where the same
//! column name surfaces in more than one place, in which case only the
//! qualified form is permitted. That keeps `order("name")` from silently
//! matching the wrong table's `name` column when two joined tables both
//! have one.

use std::collections::{HashMap, HashSet};

use crate::types::SortEntry;

/// One input to whitelist construction: either a literal field identifier
/// or a table with its column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A caller-supplied field identifier, permitted verbatim.
    Field(String),
    /// A table descriptor, expanded to qualified and (where unambiguous)
    /// bare column identifiers.
    Table {
        /// Table name used to qualify the columns.
        name: String,
        /// Column names, in schema order.
        columns: Vec<String>,
    },
}

impl Source {
    /// Create a table descriptor source.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortq::Source;
    ///
    /// let users = Source::table("users", ["id", "name", "email"]);
    /// ```
    pub fn table(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self::Table {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// The bare identifier this source contributes to the ambiguity pass:
    /// the text after the final dot for literal fields, or each column for
    /// descriptors (handled by the caller).
    fn bare(field: &str) -> &str {
        field.rsplit_once('.').map_or(field, |(_, column)| column)
    }
}

impl From<&str> for Source {
    fn from(field: &str) -> Self {
        Self::Field(field.to_string())
    }
}

impl From<String> for Source {
    fn from(field: String) -> Self {
        Self::Field(field)
    }
}

/// The set of permitted field identifiers, or no restriction at all.
///
/// Unrestricted is distinct from an empty set: an unrestricted whitelist
/// passes every entry through untouched, while an empty one permits
/// nothing. The default is unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Whitelist {
    allowed: Option<HashSet<String>>,
}

impl Whitelist {
    /// A whitelist that permits every field.
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Build a whitelist from literal fields and table descriptors.
    ///
    /// Literal fields are permitted exactly as supplied. Each descriptor
    /// column is permitted as `table.column`, and as bare `column` only
    /// when that column name appears nowhere else in the input (in another
    /// descriptor, or as the bare part of a literal field).
    ///
    /// # Examples
    ///
    /// ```
    /// use sortq::{Source, Whitelist};
    ///
    /// let whitelist = Whitelist::from_sources([
    ///     Source::from("group.email"),
    ///     Source::table("users", ["email", "name"]),
    /// ]);
    ///
    /// assert!(whitelist.permits("group.email"));
    /// assert!(whitelist.permits("users.email"));
    /// assert!(whitelist.permits("name"));
    /// // "email" occurs in two places, so only qualified forms pass.
    /// assert!(!whitelist.permits("email"));
    /// ```
    pub fn from_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        let sources: Vec<Source> = sources.into_iter().map(Into::into).collect();

        // Ambiguity pass: count every bare candidate across the input.
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for source in &sources {
            match source {
                Source::Field(field) => *seen.entry(Source::bare(field)).or_insert(0) += 1,
                Source::Table { columns, .. } => {
                    for column in columns {
                        *seen.entry(column.as_str()).or_insert(0) += 1;
                    }
                }
            }
        }
        let ambiguous: HashSet<&str> = seen
            .into_iter()
            .filter(|&(_, count)| count > 1)
            .map(|(candidate, _)| candidate)
            .collect();

        // Emission pass: literals verbatim; descriptor columns qualified,
        // plus bare where unambiguous.
        let mut allowed = HashSet::new();
        for source in &sources {
            match source {
                Source::Field(field) => {
                    allowed.insert(field.clone());
                }
                Source::Table { name, columns } => {
                    for column in columns {
                        allowed.insert(format!("{name}.{column}"));
                        if !ambiguous.contains(column.as_str()) {
                            allowed.insert(column.clone());
                        }
                    }
                }
            }
        }

        Self {
            allowed: Some(allowed),
        }
    }

    /// Whether this whitelist permits every field.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.allowed.is_none()
    }

    /// Whether a field identifier is permitted.
    #[must_use]
    pub fn permits(&self, field: &str) -> bool {
        match &self.allowed {
            None => true,
            Some(allowed) => allowed.contains(field),
        }
    }

    /// Drop entries whose field is not permitted.
    ///
    /// An unrestricted whitelist returns the input unchanged. Filtering is
    /// idempotent.
    #[must_use]
    pub fn filter(&self, entries: Vec<SortEntry>) -> Vec<SortEntry> {
        self.filter_with(entries, |_| {})
    }

    /// Drop entries whose field is not permitted, reporting each rejection.
    ///
    /// The observer receives one message per rejected entry, in input
    /// order, formatted as `"Unpermitted sort field: <field> <direction>"`.
    /// This is a diagnostic side channel, not an error: a rejected field is
    /// an expected condition when clients request sorts they may not use.
    pub fn filter_with<F>(&self, entries: Vec<SortEntry>, mut on_rejected: F) -> Vec<SortEntry>
    where
        F: FnMut(&str),
    {
        let Some(allowed) = &self.allowed else {
            return entries;
        };
        entries
            .into_iter()
            .filter(|entry| {
                if allowed.contains(&entry.field) {
                    true
                } else {
                    on_rejected(&format!(
                        "Unpermitted sort field: {} {}",
                        entry.field, entry.direction
                    ));
                    false
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permitted(whitelist: &Whitelist) -> Vec<&str> {
        let mut fields: Vec<&str> = whitelist
            .allowed
            .as_ref()
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        fields.sort_unstable();
        fields
    }

    #[test]
    fn test_builds_from_strings_and_descriptors() {
        let whitelist = Whitelist::from_sources([
            Source::from("name"),
            Source::from("group.email"),
            Source::table("faketable", ["field1", "field2"]),
        ]);

        assert_eq!(
            permitted(&whitelist),
            vec![
                "faketable.field1",
                "faketable.field2",
                "field1",
                "field2",
                "group.email",
                "name",
            ]
        );
    }

    #[test]
    fn test_ambiguous_columns_only_keep_qualified_forms() {
        let whitelist = Whitelist::from_sources([
            Source::from("name"),
            Source::from("group.email"),
            Source::table("faketable", ["name", "field1", "field2"]),
            Source::table("faketable2", ["email", "field1", "otherfield"]),
        ]);

        // "name" collides with the literal, "email" with the bare part of
        // "group.email", "field1" with the other descriptor. "field2" and
        // "otherfield" stay reachable unqualified. The caller's literals
        // are never suppressed.
        assert_eq!(
            permitted(&whitelist),
            vec![
                "faketable.field1",
                "faketable.field2",
                "faketable.name",
                "faketable2.email",
                "faketable2.field1",
                "faketable2.otherfield",
                "field2",
                "group.email",
                "name",
                "otherfield",
            ]
        );
    }

    #[test]
    fn test_unrestricted_passes_everything() {
        let whitelist = Whitelist::unrestricted();
        assert!(whitelist.is_unrestricted());
        assert!(whitelist.permits("anything.at_all"));

        let entries = vec![SortEntry::desc("email"), SortEntry::asc("secret")];
        assert_eq!(whitelist.filter(entries.clone()), entries);
    }

    #[test]
    fn test_empty_whitelist_permits_nothing() {
        let whitelist = Whitelist::from_sources(Vec::<Source>::new());
        assert!(!whitelist.is_unrestricted());
        assert!(!whitelist.permits("email"));
        assert_eq!(whitelist.filter(vec![SortEntry::asc("email")]), vec![]);
    }

    #[test]
    fn test_filter_keeps_permitted_entries_in_order() {
        let whitelist = Whitelist::from_sources(["name", "email"]);
        let filtered = whitelist.filter(vec![
            SortEntry::desc("email"),
            SortEntry::desc("name"),
            SortEntry::asc("phone"),
        ]);
        assert_eq!(
            filtered,
            vec![SortEntry::desc("email"), SortEntry::desc("name")]
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let whitelist = Whitelist::from_sources(["name", "email"]);
        let entries = vec![
            SortEntry::desc("email"),
            SortEntry::asc("phone"),
            SortEntry::desc("name"),
        ];
        let once = whitelist.filter(entries);
        let twice = whitelist.filter(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_observer_sees_rejections_in_input_order() {
        let whitelist = Whitelist::from_sources(["user.name", "group.email", "phone"]);
        let mut messages = Vec::new();

        let filtered = whitelist.filter_with(
            vec![
                SortEntry::desc("group.email"),
                SortEntry::desc("name"),
                SortEntry::asc("address.phone"),
                SortEntry::desc("user.name"),
            ],
            |message| messages.push(message.to_string()),
        );

        assert_eq!(
            filtered,
            vec![SortEntry::desc("group.email"), SortEntry::desc("user.name")]
        );
        assert_eq!(
            messages,
            vec![
                "Unpermitted sort field: name desc",
                "Unpermitted sort field: address.phone asc",
            ]
        );
    }

    #[test]
    fn test_observer_not_called_when_unrestricted() {
        let mut calls = 0;
        let filtered = Whitelist::unrestricted()
            .filter_with(vec![SortEntry::asc("anything")], |_| calls += 1);
        assert_eq!(filtered, vec![SortEntry::asc("anything")]);
        assert_eq!(calls, 0);
    }
}
