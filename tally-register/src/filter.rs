//! View filters applied to the transaction snapshot before sorting.

use tally_model::Transaction;

/// Criteria restricting which transactions appear in the register.
///
/// Account and date range apply to the raw snapshot; the text filter
/// is matched later against enriched display fields (notes, number,
/// payee) because the payee name only exists after enrichment.
#[derive(Debug, Clone, Default)]
pub struct RegisterFilter {
    /// Restrict to one account (either leg of a transfer counts).
    pub account_id: Option<i64>,
    /// Inclusive ISO date lower bound.
    pub date_from: Option<String>,
    /// Inclusive ISO date upper bound.
    pub date_to: Option<String>,
    /// Case-insensitive substring over notes, number, and payee.
    pub text: Option<String>,
}

impl RegisterFilter {
    /// Whether the raw transaction passes the account and date-range
    /// criteria. ISO dates compare lexicographically.
    pub fn matches_txn(&self, txn: &Transaction) -> bool {
        if let Some(account_id) = self.account_id {
            if txn.account_id != account_id && txn.to_account_id != account_id {
                return false;
            }
        }
        if let Some(from) = &self.date_from {
            if txn.date.as_str() < from.as_str() {
                return false;
            }
        }
        if let Some(to) = &self.date_to {
            if txn.date.as_str() > to.as_str() {
                return false;
            }
        }
        true
    }

    /// Whether the enriched display fields pass the text criterion.
    pub fn matches_text(&self, notes: &str, number: &str, payee: &str) -> bool {
        let Some(text) = &self.text else {
            return true;
        };
        let needle = text.to_lowercase();
        notes.to_lowercase().contains(&needle)
            || number.to_lowercase().contains(&needle)
            || payee.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(account_id: i64, date: &str) -> Transaction {
        Transaction {
            account_id,
            date: date.to_string(),
            ..Transaction::default()
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = RegisterFilter::default();
        assert!(filter.matches_txn(&txn(1, "2024-03-01")));
        assert!(filter.matches_text("", "", ""));
    }

    #[test]
    fn date_range_is_inclusive() {
        let filter = RegisterFilter {
            date_from: Some("2024-01-01".to_string()),
            date_to: Some("2024-01-31".to_string()),
            ..RegisterFilter::default()
        };
        assert!(filter.matches_txn(&txn(1, "2024-01-01")));
        assert!(filter.matches_txn(&txn(1, "2024-01-31")));
        assert!(!filter.matches_txn(&txn(1, "2023-12-31")));
        assert!(!filter.matches_txn(&txn(1, "2024-02-01")));
    }

    #[test]
    fn account_filter_matches_either_transfer_leg() {
        let filter = RegisterFilter {
            account_id: Some(2),
            ..RegisterFilter::default()
        };
        let mut t = txn(1, "2024-01-05");
        t.to_account_id = 2;
        assert!(filter.matches_txn(&t));
        t.to_account_id = 3;
        assert!(!filter.matches_txn(&t));
    }

    #[test]
    fn text_filter_is_case_insensitive_substring() {
        let filter = RegisterFilter {
            text: Some("rent".to_string()),
            ..RegisterFilter::default()
        };
        assert!(filter.matches_text("Monthly RENT payment", "", ""));
        assert!(filter.matches_text("", "", "Rentokil"));
        assert!(!filter.matches_text("groceries", "42", "Acme"));
    }
}
