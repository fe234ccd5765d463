//! The facade tying tokenizing, merging, filtering and rendering together.

use std::cell::OnceCell;
use std::fmt;

use indexmap::IndexMap;

use crate::merge::merge;
use crate::render;
use crate::toggle::Toggler;
use crate::tokenize::{tokenize_order, tokenize_sort};
use crate::types::{CustomList, Direction, SortEntry};
use crate::whitelist::{Source, Whitelist};

/// Observer invoked once per whitelist-rejected entry.
type RejectionObserver = Box<dyn Fn(&str)>;

/// Parses a sort query string and a SQL-style order string into one
/// validated, ordered list and renders it back out.
///
/// The merged, whitelist-filtered list is computed lazily on the first
/// render and cached; [`reset`](Self::reset) and [`toggle`](Self::toggle)
/// invalidate it. A `Parser` is meant to be built per request - it is
/// cheap, single-threaded state.
///
/// # Examples
///
/// ```
/// use sortq::Parser;
///
/// let parser = Parser::new(Some("email_desc!name_desc"), Some("email ASC, phone ASC"));
///
/// assert_eq!(parser.to_sort_string(), "email_desc!name_desc!phone_asc");
/// assert_eq!(parser.to_order_clause(), "email DESC, name DESC, phone ASC");
/// ```
///
/// With a whitelist and rejection logging:
///
/// ```
/// use sortq::Parser;
///
/// let parser = Parser::new(Some("email_desc!secret_asc"), None)
///     .whitelist(["email", "name"])
///     .log_rejections();
///
/// assert_eq!(parser.to_order_clause(), "email DESC");
/// ```
pub struct Parser {
    sort: Option<String>,
    order: Option<String>,
    sorts: Vec<SortEntry>,
    orders: Vec<SortEntry>,
    skipped: Vec<String>,
    whitelist: Whitelist,
    custom: CustomList,
    on_rejected: Option<RejectionObserver>,
    entries: OnceCell<Vec<SortEntry>>,
}

impl Parser {
    /// Tokenize the two raw inputs. Absent input contributes no entries.
    #[must_use]
    pub fn new(sort: Option<&str>, order: Option<&str>) -> Self {
        let sort_tokens = tokenize_sort(sort.unwrap_or_default());
        let order_tokens = tokenize_order(order.unwrap_or_default());
        let mut skipped = sort_tokens.skipped;
        skipped.extend(order_tokens.skipped);

        Self {
            sort: sort.map(str::to_string),
            order: order.map(str::to_string),
            sorts: sort_tokens.entries,
            orders: order_tokens.entries,
            skipped,
            whitelist: Whitelist::unrestricted(),
            custom: CustomList::new(),
            on_rejected: None,
            entries: OnceCell::new(),
        }
    }

    /// Restrict output to fields permitted by the given sources.
    ///
    /// The default is no restriction. Passing an empty source list permits
    /// nothing - the two states are deliberately distinct.
    #[must_use]
    pub fn whitelist<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Source>,
    {
        self.whitelist = Whitelist::from_sources(sources);
        self.entries = OnceCell::new();
        self
    }

    /// Replace the whole custom-render table.
    #[must_use]
    pub fn custom(mut self, custom: CustomList) -> Self {
        self.custom = custom;
        self
    }

    /// Register one rendering override; see [`CustomList::rewrite`].
    #[must_use]
    pub fn rewrite(
        mut self,
        field: impl Into<String>,
        direction: Direction,
        fragment: impl Into<String>,
    ) -> Self {
        self.custom = self.custom.rewrite(field, direction, fragment);
        self
    }

    /// Install an observer called once per whitelist-rejected entry, in
    /// input order, with a message like `"Unpermitted sort field: name desc"`.
    #[must_use]
    pub fn on_rejected(mut self, observer: impl Fn(&str) + 'static) -> Self {
        self.on_rejected = Some(Box::new(observer));
        self.entries = OnceCell::new();
        self
    }

    /// Report rejected fields through [`log::debug!`].
    #[must_use]
    pub fn log_rejections(self) -> Self {
        self.on_rejected(|message| log::debug!("{message}"))
    }

    /// The raw sort string, as supplied.
    #[must_use]
    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    /// The raw order string, as supplied.
    #[must_use]
    pub fn order(&self) -> Option<&str> {
        self.order.as_deref()
    }

    /// Entries tokenized from the sort string (pre-merge, pre-filter).
    #[must_use]
    pub fn sorts(&self) -> &[SortEntry] {
        &self.sorts
    }

    /// Entries tokenized from the order string (pre-merge, pre-filter).
    #[must_use]
    pub fn orders(&self) -> &[SortEntry] {
        &self.orders
    }

    /// Raw segments the tokenizers dropped, sort-string segments first.
    #[must_use]
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// The merged, whitelist-filtered entry list.
    ///
    /// Computed on first access and cached until [`reset`](Self::reset) or
    /// [`toggle`](Self::toggle).
    pub fn entries(&self) -> &[SortEntry] {
        self.entries.get_or_init(|| self.compute())
    }

    /// Invalidate the cached list; the next access recomputes the default
    /// merge.
    pub fn reset(&mut self) -> &mut Self {
        self.entries.take();
        self
    }

    /// Replace the cached list with a strategy-built one.
    ///
    /// The strategy receives the tokenized `sorts` and `orders` and returns
    /// the replacement list; the whitelist is re-applied to whatever it
    /// returns, so toggling can never expose an unpermitted field.
    pub fn toggle<T: Toggler>(&mut self, toggler: &T) -> &mut Self {
        let next = self.apply_whitelist(toggler.toggle(&self.sorts, &self.orders));
        let cell = OnceCell::new();
        let _ = cell.set(next);
        self.entries = cell;
        self
    }

    /// Render the canonical `!`-encoded sort string.
    #[must_use]
    pub fn to_sort_string(&self) -> String {
        render::sort_string(self.entries())
    }

    /// Render the insertion-ordered field-to-direction mapping.
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, Direction> {
        render::mapping(self.entries())
    }

    /// Render the ORDER BY clause with identity quoting.
    #[must_use]
    pub fn to_order_clause(&self) -> String {
        self.to_order_clause_with(|fragment| fragment.to_string())
    }

    /// Render the ORDER BY clause, quoting each dotted-field segment with
    /// the supplied function.
    ///
    /// ```
    /// use sortq::{Dialect, Parser, Postgres};
    ///
    /// let parser = Parser::new(None, Some("users.name DESC"));
    /// assert_eq!(
    ///     parser.to_order_clause_with(Postgres.quoter()),
    ///     r#""users"."name" DESC"#
    /// );
    /// ```
    pub fn to_order_clause_with<F>(&self, quoter: F) -> String
    where
        F: Fn(&str) -> String,
    {
        render::order_clause(self.entries(), quoter, &self.custom)
    }

    fn compute(&self) -> Vec<SortEntry> {
        self.apply_whitelist(merge(&self.sorts, &self.orders))
    }

    fn apply_whitelist(&self, entries: Vec<SortEntry>) -> Vec<SortEntry> {
        match &self.on_rejected {
            Some(observer) => self
                .whitelist
                .filter_with(entries, |message| observer(message)),
            None => self.whitelist.filter(entries),
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("sort", &self.sort)
            .field("order", &self.order)
            .field("sorts", &self.sorts)
            .field("orders", &self.orders)
            .field("skipped", &self.skipped)
            .field("whitelist", &self.whitelist)
            .field("custom", &self.custom)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_nil_inputs_yield_empty_everything() {
        let parser = Parser::new(None, None);
        assert!(parser.sorts().is_empty());
        assert!(parser.orders().is_empty());
        assert!(parser.entries().is_empty());
        assert_eq!(parser.to_sort_string(), "");
        assert_eq!(parser.to_order_clause(), "");
        assert!(parser.to_map().is_empty());
    }

    #[test]
    fn test_raw_accessors() {
        let parser = Parser::new(Some("email_desc"), None);
        assert_eq!(parser.sort(), Some("email_desc"));
        assert_eq!(parser.order(), None);
    }

    #[test]
    fn test_entries_are_cached_until_reset() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut parser = Parser::new(Some("email_desc!secret_asc"), None)
            .whitelist(["email"])
            .on_rejected(move |_| counter.set(counter.get() + 1));

        assert_eq!(parser.entries(), &[SortEntry::desc("email")]);
        assert_eq!(calls.get(), 1);

        // Second access hits the cache; the observer does not re-fire.
        assert_eq!(parser.entries(), &[SortEntry::desc("email")]);
        assert_eq!(calls.get(), 1);

        parser.reset();
        assert_eq!(parser.entries(), &[SortEntry::desc("email")]);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_toggle_uses_strategy_and_reapplies_whitelist() {
        let reverse_sorts = |sorts: &[SortEntry], _orders: &[SortEntry]| {
            sorts
                .iter()
                .map(|entry| SortEntry::new(entry.field.clone(), entry.direction.reversed()))
                .collect::<Vec<_>>()
        };

        let mut parser =
            Parser::new(Some("email_asc!secret_asc"), None).whitelist(["email", "name"]);
        parser.toggle(&reverse_sorts);
        assert_eq!(parser.entries(), &[SortEntry::desc("email")]);

        // reset() falls back to the default merge.
        parser.reset();
        assert_eq!(parser.entries(), &[SortEntry::asc("email")]);
    }

    #[test]
    fn test_toggle_strategy_cannot_widen_whitelist() {
        let inject = |_sorts: &[SortEntry], _orders: &[SortEntry]| {
            vec![SortEntry::asc("forbidden"), SortEntry::asc("email")]
        };

        let mut parser = Parser::new(None, Some("email")).whitelist(["email"]);
        parser.toggle(&inject);
        assert_eq!(parser.entries(), &[SortEntry::asc("email")]);
    }

    #[test]
    fn test_observer_fires_during_compute() {
        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&messages);

        let parser = Parser::new(
            Some("group.email_desc!name_desc"),
            Some("group.email ASC, address.phone ASC, user.name DESC"),
        )
        .whitelist(["user.name", "group.email", "phone"])
        .on_rejected(move |message| sink.borrow_mut().push(message.to_string()));

        let _ = parser.to_order_clause();
        assert_eq!(
            *messages.borrow(),
            vec![
                "Unpermitted sort field: name desc".to_string(),
                "Unpermitted sort field: address.phone asc".to_string(),
            ]
        );
    }

    #[test]
    fn test_log_rejections_is_quiet_without_a_logger() {
        let parser = Parser::new(Some("secret_desc"), None)
            .whitelist(["email"])
            .log_rejections();
        assert_eq!(parser.to_order_clause(), "");
    }

    #[test]
    fn test_custom_rewrite_via_builder() {
        let parser = Parser::new(Some("group.email_asc!name_desc"), None).rewrite(
            "group.email",
            Direction::Asc,
            "group.email IS NOT NULL ASC, group.email ASC",
        );
        assert_eq!(
            parser.to_order_clause(),
            "group.email IS NOT NULL ASC, group.email ASC, name DESC"
        );
    }

    #[test]
    fn test_debug_does_not_require_observer_debug() {
        let parser = Parser::new(Some("email_desc"), None).on_rejected(|_| ());
        let rendered = format!("{parser:?}");
        assert!(rendered.contains("email_desc"));
    }
}
