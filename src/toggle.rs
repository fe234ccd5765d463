//! Direction toggling for UI sort links, as a caller-supplied strategy.
//!
//! The crate does not pick a toggling algorithm. Which field flips, how
//! cycling behaves and how multiple fields interact are application
//! decisions, so [`Parser::toggle`](crate::Parser::toggle) delegates list
//! construction to a [`Toggler`] and only re-applies its whitelist to the
//! result.

use crate::types::SortEntry;

/// Strategy producing the next entry list from the current token lists.
///
/// Implementations receive the tokenized sort-string entries and
/// order-string entries exactly as parsed (pre-merge, pre-filter) and
/// return the full replacement list in priority order. The facade filters
/// the returned list through its whitelist, so a strategy cannot widen what
/// a client may sort by.
///
/// Any `Fn(&[SortEntry], &[SortEntry]) -> Vec<SortEntry>` closure is a
/// `Toggler`:
///
/// ```
/// use sortq::{SortEntry, Toggler};
///
/// let flip_first = |sorts: &[SortEntry], _orders: &[SortEntry]| {
///     let mut next = sorts.to_vec();
///     if let Some(first) = next.first_mut() {
///         first.direction = first.direction.reversed();
///     }
///     next
/// };
///
/// let next = flip_first.toggle(&[SortEntry::asc("email")], &[]);
/// assert_eq!(next, vec![SortEntry::desc("email")]);
/// ```
pub trait Toggler {
    /// Build the next ordered entry list.
    fn toggle(&self, sorts: &[SortEntry], orders: &[SortEntry]) -> Vec<SortEntry>;
}

impl<F> Toggler for F
where
    F: Fn(&[SortEntry], &[SortEntry]) -> Vec<SortEntry>,
{
    fn toggle(&self, sorts: &[SortEntry], orders: &[SortEntry]) -> Vec<SortEntry> {
        self(sorts, orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_closure_is_a_toggler() {
        let reverse_all = |sorts: &[SortEntry], orders: &[SortEntry]| {
            sorts
                .iter()
                .chain(orders)
                .map(|entry| SortEntry::new(entry.field.clone(), entry.direction.reversed()))
                .collect()
        };

        let next = reverse_all.toggle(
            &[SortEntry::asc("email")],
            &[SortEntry::desc("name")],
        );
        assert_eq!(
            next,
            vec![SortEntry::desc("email"), SortEntry::asc("name")]
        );
        assert_eq!(next[0].direction, Direction::Desc);
    }
}
