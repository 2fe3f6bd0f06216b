//! Data model types for the finance ledger.
//!
//! These types represent the persistent schema: accounts, payees,
//! categories, transactions, split lines, attachment links, and
//! transfer links. Primary keys are `i64`; a value below 1 marks a
//! record as new/unsaved.

use serde::{Deserialize, Serialize};

// ── Transaction kind & status ───────────────────────────────────────────────

/// The direction of a transaction relative to its owning account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionKind {
    #[default]
    Withdrawal,
    Deposit,
    Transfer,
}

impl TransactionKind {
    /// Canonical storage string, as written to the `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Transfer => "Transfer",
        }
    }

    /// Parse a storage string leniently; unknown input falls back to
    /// `Withdrawal` rather than failing, so a hand-edited database
    /// still loads.
    pub fn from_str_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "deposit" => TransactionKind::Deposit,
            "transfer" => TransactionKind::Transfer,
            _ => TransactionKind::Withdrawal,
        }
    }
}

impl Serialize for TransactionKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TransactionKind::from_str_loose(&s))
    }
}

/// Reconciliation status of a transaction.
///
/// Stored as a single-letter code; the empty string means unreconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionStatus {
    #[default]
    None,
    Reconciled,
    Void,
    FollowUp,
    Duplicate,
}

impl TransactionStatus {
    /// Canonical storage code ("" / "R" / "V" / "F" / "D").
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::None => "",
            TransactionStatus::Reconciled => "R",
            TransactionStatus::Void => "V",
            TransactionStatus::FollowUp => "F",
            TransactionStatus::Duplicate => "D",
        }
    }

    /// Parse a storage code leniently (case-insensitive); unknown input
    /// is treated as unreconciled.
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "R" => TransactionStatus::Reconciled,
            "V" => TransactionStatus::Void,
            "F" => TransactionStatus::FollowUp,
            "D" => TransactionStatus::Duplicate,
            _ => TransactionStatus::None,
        }
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TransactionStatus::from_str_loose(&s))
    }
}

// ── Transaction ─────────────────────────────────────────────────────────────

/// A single ledger transaction row.
///
/// `to_account_id` and `to_amount` are only meaningful for transfers;
/// `color_id` is a user-assigned highlight slot (0 = none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub to_account_id: i64,
    pub payee_id: i64,
    pub kind: TransactionKind,
    pub amount: f64,
    pub status: TransactionStatus,
    pub number: String,
    pub notes: String,
    pub category_id: i64,
    pub subcategory_id: i64,
    /// ISO-8601 date (`YYYY-MM-DD`); lexicographic order is date order.
    pub date: String,
    pub color_id: i64,
    pub to_amount: f64,
}

impl Default for Transaction {
    fn default() -> Self {
        Transaction {
            id: -1,
            account_id: -1,
            to_account_id: -1,
            payee_id: -1,
            kind: TransactionKind::default(),
            amount: 0.0,
            status: TransactionStatus::default(),
            number: String::new(),
            notes: String::new(),
            category_id: -1,
            subcategory_id: -1,
            date: String::new(),
            color_id: 0,
            to_amount: 0.0,
        }
    }
}

impl Transaction {
    /// Whether this row moves money between two owned accounts.
    pub fn is_transfer(&self) -> bool {
        self.kind == TransactionKind::Transfer
    }
}

// ── Split line ──────────────────────────────────────────────────────────────

/// One category split of a transaction's amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitLine {
    pub id: i64,
    pub trans_id: i64,
    pub category_id: i64,
    pub subcategory_id: i64,
    pub amount: f64,
    pub notes: String,
}

impl Default for SplitLine {
    fn default() -> Self {
        SplitLine {
            id: -1,
            trans_id: -1,
            category_id: -1,
            subcategory_id: -1,
            amount: 0.0,
            notes: String::new(),
        }
    }
}

// ── Attachment link ─────────────────────────────────────────────────────────

/// Reference type string for transaction attachments.
pub const ATTACHMENT_REF_TRANSACTION: &str = "Transaction";

/// A link from an entity to a stored attachment file.
///
/// Only the link row lives here; the file itself is managed elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentLink {
    pub id: i64,
    pub ref_type: String,
    pub ref_id: i64,
    pub filename: String,
    pub description: String,
}

impl Default for AttachmentLink {
    fn default() -> Self {
        AttachmentLink {
            id: -1,
            ref_type: String::new(),
            ref_id: -1,
            filename: String::new(),
            description: String::new(),
        }
    }
}

// ── Transfer link ───────────────────────────────────────────────────────────

/// A link row pairing a transaction with the record it transfers
/// against (e.g. the other leg of a cross-currency transfer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferLink {
    pub id: i64,
    pub trans_id: i64,
    pub link_type: String,
    pub link_record_id: i64,
}

impl Default for TransferLink {
    fn default() -> Self {
        TransferLink {
            id: -1,
            trans_id: -1,
            link_type: String::new(),
            link_record_id: -1,
        }
    }
}

// ── Account ─────────────────────────────────────────────────────────────────

/// A bank/cash account owning transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub initial_balance: f64,
}

impl Default for Account {
    fn default() -> Self {
        Account {
            id: -1,
            name: String::new(),
            initial_balance: 0.0,
        }
    }
}

// ── Payee ───────────────────────────────────────────────────────────────────

/// A counterparty for withdrawals and deposits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payee {
    pub id: i64,
    pub name: String,
}

impl Default for Payee {
    fn default() -> Self {
        Payee {
            id: -1,
            name: String::new(),
        }
    }
}

// ── Category / subcategory ──────────────────────────────────────────────────

/// A top-level spending category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Default for Category {
    fn default() -> Self {
        Category {
            id: -1,
            name: String::new(),
        }
    }
}

/// A subdivision of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
}

impl Default for Subcategory {
    fn default() -> Self {
        Subcategory {
            id: -1,
            category_id: -1,
            name: String::new(),
        }
    }
}
