//! Priority merge of the two tokenized lists.

use crate::types::SortEntry;

/// Combine sort-string entries with order-string entries.
///
/// `sorts` wins field-by-field: the result starts with a copy of `sorts` in
/// its original order, then each `orders` entry is appended only if its
/// field is not already present anywhere in the accumulated list. The sort
/// string therefore has absolute priority over the order string, and the
/// first occurrence of a field is the one that survives.
///
/// Duplicate fields *within* `sorts` are kept as-is; only cross-list
/// duplicates are suppressed here.
///
/// # Examples
///
/// ```
/// use sortq::{SortEntry, merge};
///
/// let sorts = vec![SortEntry::desc("email"), SortEntry::desc("name")];
/// let orders = vec![
///     SortEntry::asc("email"),
///     SortEntry::asc("phone"),
///     SortEntry::desc("name"),
/// ];
///
/// assert_eq!(
///     merge(&sorts, &orders),
///     vec![
///         SortEntry::desc("email"),
///         SortEntry::desc("name"),
///         SortEntry::asc("phone"),
///     ]
/// );
/// ```
#[must_use]
pub fn merge(sorts: &[SortEntry], orders: &[SortEntry]) -> Vec<SortEntry> {
    let mut merged = sorts.to_vec();
    for order in orders {
        if !merged.iter().any(|entry| entry.field == order.field) {
            merged.push(order.clone());
        }
    }
    merged
}
