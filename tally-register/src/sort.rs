//! Stable register sorting.

use crate::view::RegisterRow;

/// The sortable register columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Date,
    Number,
    Payee,
    Status,
    Category,
    Withdrawal,
    Deposit,
    Balance,
    Notes,
}

impl SortColumn {
    /// Settings-file name for this column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Date => "date",
            SortColumn::Number => "number",
            SortColumn::Payee => "payee",
            SortColumn::Status => "status",
            SortColumn::Category => "category",
            SortColumn::Withdrawal => "withdrawal",
            SortColumn::Deposit => "deposit",
            SortColumn::Balance => "balance",
            SortColumn::Notes => "notes",
        }
    }

    /// Parse a settings-file name leniently; unknown input falls back
    /// to the date column.
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "id" => SortColumn::Id,
            "number" => SortColumn::Number,
            "payee" => SortColumn::Payee,
            "status" => SortColumn::Status,
            "category" => SortColumn::Category,
            "withdrawal" => SortColumn::Withdrawal,
            "deposit" => SortColumn::Deposit,
            "balance" => SortColumn::Balance,
            "notes" => SortColumn::Notes,
            _ => SortColumn::Date,
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            column: SortColumn::Date,
            ascending: true,
        }
    }
}

impl SortState {
    /// Column-header click semantics: re-selecting the current column
    /// toggles direction, a new column resets to ascending.
    pub fn select(&mut self, column: SortColumn) {
        if self.column == column {
            self.ascending = !self.ascending;
        } else {
            self.column = column;
            self.ascending = true;
        }
    }
}

/// Stable sort of the register rows.
///
/// Descending order reverses the key comparison, not the sorted list,
/// so rows with equal keys keep their prior relative order in both
/// directions.
pub fn sort_rows(rows: &mut [RegisterRow], sort: SortState) {
    rows.sort_by(|a, b| {
        let ord = compare(a, b, sort.column);
        if sort.ascending { ord } else { ord.reverse() }
    });
}

fn compare(a: &RegisterRow, b: &RegisterRow, column: SortColumn) -> std::cmp::Ordering {
    match column {
        SortColumn::Id => a.txn.id.cmp(&b.txn.id),
        SortColumn::Date => a.txn.date.cmp(&b.txn.date),
        SortColumn::Number => fold(&a.txn.number).cmp(&fold(&b.txn.number)),
        SortColumn::Payee => fold(&a.payee_name).cmp(&fold(&b.payee_name)),
        SortColumn::Status => a.txn.status.as_str().cmp(b.txn.status.as_str()),
        SortColumn::Category => fold(&a.category_name).cmp(&fold(&b.category_name)),
        SortColumn::Withdrawal => a.withdrawal().total_cmp(&b.withdrawal()),
        SortColumn::Deposit => a.deposit().total_cmp(&b.deposit()),
        SortColumn::Balance => a.balance.total_cmp(&b.balance),
        SortColumn::Notes => fold(&a.txn.notes).cmp(&fold(&b.txn.notes)),
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}
