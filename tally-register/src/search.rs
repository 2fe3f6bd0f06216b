//! Incremental text search over the visible rows.
//!
//! The scan starts next to the current selection and walks the rows in
//! the active sort direction (upward when ascending, downward when
//! descending), wrapping around the ends once. The match is a
//! case-insensitive prefix test against the searchable display columns.

use crate::sort::SortColumn;
use crate::view::RegisterRow;

const SEARCH_COLUMNS: [SortColumn; 7] = [
    SortColumn::Notes,
    SortColumn::Number,
    SortColumn::Payee,
    SortColumn::Category,
    SortColumn::Date,
    SortColumn::Withdrawal,
    SortColumn::Deposit,
];

/// Find the next row whose display text starts with `query`, scanning
/// outward from `selection` in the direction implied by the sort.
/// Covers every row exactly once (wrapping), then gives up with `None`.
pub fn search_next(
    rows: &[RegisterRow],
    query: &str,
    selection: Option<usize>,
    ascending: bool,
) -> Option<usize> {
    if rows.is_empty() || query.is_empty() {
        return None;
    }
    let len = rows.len();
    let needle = query.to_lowercase();

    let start = selection
        .filter(|&s| s < len)
        .unwrap_or(if ascending { len - 1 } else { 0 });

    let mut index = start;
    for _ in 0..len {
        index = if ascending {
            (index + len - 1) % len
        } else {
            (index + 1) % len
        };
        if row_matches(&rows[index], &needle) {
            return Some(index);
        }
    }
    None
}

/// Selection fallback after a fruitless search: the last row under an
/// ascending sort, the first otherwise. `None` for an empty register.
pub fn reset_selection(len: usize, ascending: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(if ascending { len - 1 } else { 0 })
}

fn row_matches(row: &RegisterRow, needle: &str) -> bool {
    SEARCH_COLUMNS
        .iter()
        .any(|&col| row.cell(col).to_lowercase().starts_with(needle))
}
