//! Bulk operations over the current view.
//!
//! Every batch runs under savepoints so it commits or rolls back as a
//! whole. Confirmation prompts happen upstream; once one of these
//! starts it runs to completion or rolls back; there is no mid-flight
//! cancellation.

use tally_db::Ledger;
use tally_model::TransactionStatus;

use crate::settings::ViewSettings;
use crate::view::{today_iso, RegisterRow};

/// Apply a new status to the selected rows, atomically.
///
/// Each save writes through the store, so cached handles for the same
/// ids observe the change immediately.
pub fn mark_rows(
    ledger: &mut Ledger,
    rows: &mut [RegisterRow],
    selected: &[usize],
    status: TransactionStatus,
) -> bool {
    if !ledger.transactions.savepoint() {
        return false;
    }
    let mut ok = true;
    for &index in selected {
        if let Some(row) = rows.get_mut(index) {
            row.txn.status = status;
            ok &= ledger.transactions.save_value(&mut row.txn);
        }
    }
    if ok {
        ledger.transactions.release_savepoint()
    } else {
        log::warn!("bulk status change failed, rolling back");
        ledger.transactions.rollback_savepoint();
        ledger.transactions.release_savepoint();
        false
    }
}

/// Apply a new status to every row in the current view, atomically.
pub fn mark_viewed(
    ledger: &mut Ledger,
    rows: &mut [RegisterRow],
    status: TransactionStatus,
) -> bool {
    let all: Vec<usize> = (0..rows.len()).collect();
    mark_rows(ledger, rows, &all, status)
}

/// Delete every transaction in the current view, with full dependent
/// cascades, as one savepoint-scoped batch.
pub fn delete_viewed(ledger: &mut Ledger, rows: &[RegisterRow]) -> bool {
    let ids: Vec<i64> = rows.iter().map(|r| r.txn.id).collect();
    ledger.remove_transactions(&ids)
}

/// Delete every viewed transaction carrying the given status (e.g.
/// follow-up or unreconciled cleanup), as one savepoint-scoped batch.
pub fn delete_matching(
    ledger: &mut Ledger,
    rows: &[RegisterRow],
    status: TransactionStatus,
) -> bool {
    let ids: Vec<i64> = rows
        .iter()
        .filter(|r| r.txn.status == status)
        .map(|r| r.txn.id)
        .collect();
    ledger.remove_transactions(&ids)
}

/// Paste (duplicate) a previously copied transaction, dating the copy
/// per the user's paste preference. Returns the new transaction id.
pub fn paste_transaction(
    ledger: &mut Ledger,
    source_id: i64,
    settings: &ViewSettings,
) -> Option<i64> {
    let date_override = if settings.paste_keeps_date {
        None
    } else {
        Some(today_iso())
    };
    ledger.duplicate_transaction(source_id, date_override.as_deref())
}
