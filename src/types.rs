//! Core types shared across the parsing pipeline.

use std::collections::HashMap;
use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Ascending order (A-Z, 1-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-1, newest first).
    Desc,
}

impl Direction {
    /// Parse a direction word, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use sortq::Direction;
    ///
    /// assert_eq!(Direction::parse("asc"), Some(Direction::Asc));
    /// assert_eq!(Direction::parse("DESC"), Some(Direction::Desc));
    /// assert_eq!(Direction::parse("descending"), None);
    /// ```
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if word.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    /// Lowercase form used in sort strings and mappings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Uppercase form used in ORDER BY clauses.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `(field, direction)` pair produced by tokenizing.
///
/// The field may be a bare column (`"name"`) or a dotted path
/// (`"users.name"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortEntry {
    /// Field identifier, kept exactly as it appeared in the input.
    pub field: String,
    /// Direction, normalized during tokenizing.
    pub direction: Direction,
}

impl SortEntry {
    /// Create a new sort entry.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending entry.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Asc)
    }

    /// Create a descending entry.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, Direction::Desc)
    }
}

/// Rendering overrides for specific field/direction combinations.
///
/// When a merged entry matches a registered combination, the renderer emits
/// the registered SQL fragment verbatim instead of the quoted default. The
/// fragment is trusted, caller-authored SQL; it is never passed through the
/// quoting function.
///
/// # Examples
///
/// ```
/// use sortq::{CustomList, Direction};
///
/// let custom = CustomList::new().rewrite(
///     "group.email",
///     Direction::Asc,
///     "group.email IS NOT NULL ASC, group.email ASC",
/// );
///
/// let parser = sortq::parse(Some("group.email_asc!name_desc"), None).custom(custom);
/// assert_eq!(
///     parser.to_order_clause(),
///     "group.email IS NOT NULL ASC, group.email ASC, name DESC"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomList {
    overrides: HashMap<String, String>,
}

impl CustomList {
    /// Create an empty override table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a literal fragment for one field/direction combination.
    #[must_use]
    pub fn rewrite(
        mut self,
        field: impl Into<String>,
        direction: Direction,
        fragment: impl Into<String>,
    ) -> Self {
        let field = field.into();
        self.overrides
            .insert(format!("{field} {direction}"), fragment.into());
        self
    }

    /// Look up the override fragment for an entry, if one is registered.
    #[must_use]
    pub fn fragment_for(&self, entry: &SortEntry) -> Option<&str> {
        self.overrides
            .get(&format!("{} {}", entry.field, entry.direction))
            .map(String::as_str)
    }

    /// Whether no overrides are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
