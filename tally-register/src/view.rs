//! Snapshot enrichment: turning raw transaction rows into display rows.
//!
//! Enrichment happens once per refresh: the full transaction set is
//! re-fetched, filtered, and walked in date order to compute the
//! denormalized fields (signed amount, running balance, payee and
//! category display names). There is no incremental update path.

use std::collections::{HashMap, HashSet};

use tally_db::{Ledger, TransactionColumn};
use tally_model::{Transaction, TransactionKind};

use crate::filter::RegisterFilter;
use crate::sort::SortColumn;

/// One renderable register line: the raw transaction plus its
/// display fields, computed at refresh time.
#[derive(Debug, Clone)]
pub struct RegisterRow {
    pub txn: Transaction,
    pub payee_name: String,
    pub category_name: String,
    /// Amount signed relative to the viewed account: withdrawals and
    /// outgoing transfers are negative, deposits and incoming
    /// transfers positive.
    pub amount: f64,
    /// Running account balance after this row, in date order.
    pub balance: f64,
}

impl RegisterRow {
    /// Withdrawal-column value (positive magnitude, 0 for deposits).
    pub fn withdrawal(&self) -> f64 {
        if self.amount <= 0.0 { -self.amount } else { 0.0 }
    }

    /// Deposit-column value (0 for withdrawals).
    pub fn deposit(&self) -> f64 {
        if self.amount > 0.0 { self.amount } else { 0.0 }
    }

    /// Display text for one column, as search and export see it.
    pub fn cell(&self, column: SortColumn) -> String {
        match column {
            SortColumn::Id => self.txn.id.to_string(),
            SortColumn::Date => self.txn.date.clone(),
            SortColumn::Number => self.txn.number.clone(),
            SortColumn::Payee => self.payee_name.clone(),
            SortColumn::Status => self.txn.status.as_str().to_string(),
            SortColumn::Category => self.category_name.clone(),
            SortColumn::Withdrawal => {
                if self.amount <= 0.0 {
                    format!("{:.2}", -self.amount)
                } else {
                    String::new()
                }
            }
            SortColumn::Deposit => {
                if self.amount > 0.0 {
                    format!("{:.2}", self.amount)
                } else {
                    String::new()
                }
            }
            SortColumn::Balance => format!("{:.2}", self.balance),
            SortColumn::Notes => self.txn.notes.replace('\n', " "),
        }
    }
}

/// Today as an ISO date, for paste-date defaulting.
pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Re-fetch, filter, and enrich the register rows.
///
/// The snapshot comes from `transactions.all` ordered by date, so the
/// running balance accumulates chronologically; it is seeded with the
/// viewed account's initial balance when the filter names one.
pub fn build_rows(ledger: &Ledger, filter: &RegisterFilter) -> Vec<RegisterRow> {
    let payees: HashMap<i64, String> = ledger
        .payees
        .all(None, true)
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    let account_rows = ledger.accounts.all(None, true);
    let mut balance = filter
        .account_id
        .and_then(|id| account_rows.iter().find(|a| a.id == id))
        .map(|a| a.initial_balance)
        .unwrap_or(0.0);
    let accounts: HashMap<i64, String> = account_rows
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    let categories: HashMap<i64, String> = ledger
        .categories
        .all(None, true)
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let subcategories: HashMap<i64, String> = ledger
        .subcategories
        .all(None, true)
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let split_owners: HashSet<i64> = ledger
        .splits
        .all(None, true)
        .into_iter()
        .map(|s| s.trans_id)
        .collect();

    let mut rows = Vec::new();
    for txn in ledger
        .transactions
        .all(Some(TransactionColumn::Date), true)
    {
        if !filter.matches_txn(&txn) {
            continue;
        }

        let amount = signed_amount(&txn, filter.account_id);
        let payee_name = payee_display(&txn, filter.account_id, &payees, &accounts);
        let category_name = category_display(&txn, &split_owners, &categories, &subcategories);

        if !filter.matches_text(&txn.notes, &txn.number, &payee_name) {
            continue;
        }

        balance += amount;
        rows.push(RegisterRow {
            txn,
            payee_name,
            category_name,
            amount,
            balance,
        });
    }
    rows
}

/// Amount signed relative to the viewed account. Transfers flip sign
/// depending on which leg the viewed account is; the incoming leg uses
/// the transfer's destination amount.
fn signed_amount(txn: &Transaction, account_id: Option<i64>) -> f64 {
    match txn.kind {
        TransactionKind::Withdrawal => -txn.amount,
        TransactionKind::Deposit => txn.amount,
        TransactionKind::Transfer => {
            if account_id == Some(txn.to_account_id) {
                txn.to_amount
            } else {
                -txn.amount
            }
        }
    }
}

fn payee_display(
    txn: &Transaction,
    account_id: Option<i64>,
    payees: &HashMap<i64, String>,
    accounts: &HashMap<i64, String>,
) -> String {
    if txn.is_transfer() {
        // the counterparty account stands in for the payee
        if account_id == Some(txn.to_account_id) {
            let from = accounts.get(&txn.account_id).cloned().unwrap_or_default();
            format!("< {from}")
        } else {
            let to = accounts.get(&txn.to_account_id).cloned().unwrap_or_default();
            format!("> {to}")
        }
    } else {
        payees.get(&txn.payee_id).cloned().unwrap_or_default()
    }
}

fn category_display(
    txn: &Transaction,
    split_owners: &HashSet<i64>,
    categories: &HashMap<i64, String>,
    subcategories: &HashMap<i64, String>,
) -> String {
    if split_owners.contains(&txn.id) {
        return "Split".to_string();
    }
    let category = categories.get(&txn.category_id).cloned().unwrap_or_default();
    match subcategories.get(&txn.subcategory_id) {
        Some(sub) if !category.is_empty() => format!("{category}:{sub}"),
        _ => category,
    }
}
