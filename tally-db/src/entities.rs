//! Table bindings for all ledger entity types.
//!
//! Each entity gets a column enumeration (total name mapping in both
//! directions) and an [`Entity`] implementation carrying its DDL,
//! row mapping, and insert/update statements.

use rusqlite::{params, Connection, Row};
use serde_json::json;

use crate::entity::{ColumnMeta, Entity, Predicate};
use tally_model::{
    Account, AttachmentLink, Category, Payee, SplitLine, Subcategory, Transaction,
    TransactionKind, TransactionStatus, TransferLink,
};

// ── Transaction ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionColumn {
    Id,
    AccountId,
    ToAccountId,
    PayeeId,
    Kind,
    Amount,
    Status,
    Number,
    Notes,
    CategoryId,
    SubcategoryId,
    Date,
    ColorId,
    ToAmount,
    Unknown,
}

impl ColumnMeta for TransactionColumn {
    fn name(self) -> &'static str {
        match self {
            TransactionColumn::Id => "id",
            TransactionColumn::AccountId => "account_id",
            TransactionColumn::ToAccountId => "to_account_id",
            TransactionColumn::PayeeId => "payee_id",
            TransactionColumn::Kind => "kind",
            TransactionColumn::Amount => "amount",
            TransactionColumn::Status => "status",
            TransactionColumn::Number => "number",
            TransactionColumn::Notes => "notes",
            TransactionColumn::CategoryId => "category_id",
            TransactionColumn::SubcategoryId => "subcategory_id",
            TransactionColumn::Date => "date",
            TransactionColumn::ColorId => "color_id",
            TransactionColumn::ToAmount => "to_amount",
            TransactionColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => TransactionColumn::Id,
            "account_id" => TransactionColumn::AccountId,
            "to_account_id" => TransactionColumn::ToAccountId,
            "payee_id" => TransactionColumn::PayeeId,
            "kind" => TransactionColumn::Kind,
            "amount" => TransactionColumn::Amount,
            "status" => TransactionColumn::Status,
            "number" => TransactionColumn::Number,
            "notes" => TransactionColumn::Notes,
            "category_id" => TransactionColumn::CategoryId,
            "subcategory_id" => TransactionColumn::SubcategoryId,
            "date" => TransactionColumn::Date,
            "color_id" => TransactionColumn::ColorId,
            "to_amount" => TransactionColumn::ToAmount,
            _ => TransactionColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        TransactionColumn::Unknown
    }
}

impl Entity for Transaction {
    type Column = TransactionColumn;

    const TABLE: &'static str = "transactions";
    const SELECT_SQL: &'static str = "SELECT id, account_id, to_account_id, payee_id, kind, \
         amount, status, number, notes, category_id, subcategory_id, date, color_id, to_amount \
         FROM transactions";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                account_id INTEGER NOT NULL,
                to_account_id INTEGER,
                payee_id INTEGER NOT NULL,
                kind TEXT NOT NULL,
                amount REAL NOT NULL,
                status TEXT,
                number TEXT,
                notes TEXT,
                category_id INTEGER,
                subcategory_id INTEGER,
                date TEXT,
                color_id INTEGER,
                to_amount REAL
            );
            CREATE INDEX IF NOT EXISTS idx_transactions_account
                ON transactions (account_id, to_account_id);
            CREATE INDEX IF NOT EXISTS idx_transactions_date
                ON transactions (date);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let kind: String = row.get(4)?;
        let status: Option<String> = row.get(6)?;
        Ok(Transaction {
            id: row.get(0)?,
            account_id: row.get(1)?,
            to_account_id: row.get::<_, Option<i64>>(2)?.unwrap_or(-1),
            payee_id: row.get(3)?,
            kind: TransactionKind::from_str_loose(&kind),
            amount: row.get(5)?,
            status: TransactionStatus::from_str_loose(status.as_deref().unwrap_or("")),
            number: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            notes: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
            category_id: row.get::<_, Option<i64>>(9)?.unwrap_or(-1),
            subcategory_id: row.get::<_, Option<i64>>(10)?.unwrap_or(-1),
            date: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
            color_id: row.get::<_, Option<i64>>(12)?.unwrap_or(0),
            to_amount: row.get::<_, Option<f64>>(13)?.unwrap_or(0.0),
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO transactions (account_id, to_account_id, payee_id, kind, amount,
                 status, number, notes, category_id, subcategory_id, date, color_id, to_amount)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                self.account_id,
                self.to_account_id,
                self.payee_id,
                self.kind.as_str(),
                self.amount,
                self.status.as_str(),
                self.number,
                self.notes,
                self.category_id,
                self.subcategory_id,
                self.date,
                self.color_id,
                self.to_amount,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE transactions SET account_id = ?1, to_account_id = ?2, payee_id = ?3,
                 kind = ?4, amount = ?5, status = ?6, number = ?7, notes = ?8,
                 category_id = ?9, subcategory_id = ?10, date = ?11, color_id = ?12,
                 to_amount = ?13
             WHERE id = ?14",
            params![
                self.account_id,
                self.to_account_id,
                self.payee_id,
                self.kind.as_str(),
                self.amount,
                self.status.as_str(),
                self.number,
                self.notes,
                self.category_id,
                self.subcategory_id,
                self.date,
                self.color_id,
                self.to_amount,
                self.id,
            ],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("id", json!(self.id)),
            ("account_id", json!(self.account_id)),
            ("to_account_id", json!(self.to_account_id)),
            ("payee_id", json!(self.payee_id)),
            ("kind", json!(self.kind.as_str())),
            ("amount", json!(self.amount)),
            ("status", json!(self.status.as_str())),
            ("number", json!(self.number)),
            ("notes", json!(self.notes)),
            ("category_id", json!(self.category_id)),
            ("subcategory_id", json!(self.subcategory_id)),
            ("date", json!(self.date)),
            ("color_id", json!(self.color_id)),
            ("to_amount", json!(self.to_amount)),
        ]
    }

    fn matches(&self, predicate: &Predicate<TransactionColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            TransactionColumn::Id => v.matches_int(self.id),
            TransactionColumn::AccountId => v.matches_int(self.account_id),
            TransactionColumn::ToAccountId => v.matches_int(self.to_account_id),
            TransactionColumn::PayeeId => v.matches_int(self.payee_id),
            TransactionColumn::Kind => v.matches_text(self.kind.as_str()),
            TransactionColumn::Amount => v.matches_real(self.amount),
            TransactionColumn::Status => v.matches_text(self.status.as_str()),
            TransactionColumn::Number => v.matches_text(&self.number),
            TransactionColumn::Notes => v.matches_text(&self.notes),
            TransactionColumn::CategoryId => v.matches_int(self.category_id),
            TransactionColumn::SubcategoryId => v.matches_int(self.subcategory_id),
            TransactionColumn::Date => v.matches_text(&self.date),
            TransactionColumn::ColorId => v.matches_int(self.color_id),
            TransactionColumn::ToAmount => v.matches_real(self.to_amount),
            TransactionColumn::Unknown => false,
        }
    }
}

// ── Split line ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitLineColumn {
    Id,
    TransId,
    CategoryId,
    SubcategoryId,
    Amount,
    Notes,
    Unknown,
}

impl ColumnMeta for SplitLineColumn {
    fn name(self) -> &'static str {
        match self {
            SplitLineColumn::Id => "id",
            SplitLineColumn::TransId => "trans_id",
            SplitLineColumn::CategoryId => "category_id",
            SplitLineColumn::SubcategoryId => "subcategory_id",
            SplitLineColumn::Amount => "amount",
            SplitLineColumn::Notes => "notes",
            SplitLineColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => SplitLineColumn::Id,
            "trans_id" => SplitLineColumn::TransId,
            "category_id" => SplitLineColumn::CategoryId,
            "subcategory_id" => SplitLineColumn::SubcategoryId,
            "amount" => SplitLineColumn::Amount,
            "notes" => SplitLineColumn::Notes,
            _ => SplitLineColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        SplitLineColumn::Unknown
    }
}

impl Entity for SplitLine {
    type Column = SplitLineColumn;

    const TABLE: &'static str = "split_lines";
    const SELECT_SQL: &'static str =
        "SELECT id, trans_id, category_id, subcategory_id, amount, notes FROM split_lines";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS split_lines (
                id INTEGER PRIMARY KEY,
                trans_id INTEGER NOT NULL,
                category_id INTEGER,
                subcategory_id INTEGER,
                amount REAL NOT NULL,
                notes TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_split_lines_trans ON split_lines (trans_id);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(SplitLine {
            id: row.get(0)?,
            trans_id: row.get(1)?,
            category_id: row.get::<_, Option<i64>>(2)?.unwrap_or(-1),
            subcategory_id: row.get::<_, Option<i64>>(3)?.unwrap_or(-1),
            amount: row.get(4)?,
            notes: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO split_lines (trans_id, category_id, subcategory_id, amount, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                self.trans_id,
                self.category_id,
                self.subcategory_id,
                self.amount,
                self.notes,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE split_lines SET trans_id = ?1, category_id = ?2, subcategory_id = ?3,
                 amount = ?4, notes = ?5
             WHERE id = ?6",
            params![
                self.trans_id,
                self.category_id,
                self.subcategory_id,
                self.amount,
                self.notes,
                self.id,
            ],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("id", json!(self.id)),
            ("trans_id", json!(self.trans_id)),
            ("category_id", json!(self.category_id)),
            ("subcategory_id", json!(self.subcategory_id)),
            ("amount", json!(self.amount)),
            ("notes", json!(self.notes)),
        ]
    }

    fn matches(&self, predicate: &Predicate<SplitLineColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            SplitLineColumn::Id => v.matches_int(self.id),
            SplitLineColumn::TransId => v.matches_int(self.trans_id),
            SplitLineColumn::CategoryId => v.matches_int(self.category_id),
            SplitLineColumn::SubcategoryId => v.matches_int(self.subcategory_id),
            SplitLineColumn::Amount => v.matches_real(self.amount),
            SplitLineColumn::Notes => v.matches_text(&self.notes),
            SplitLineColumn::Unknown => false,
        }
    }
}

// ── Attachment link ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentLinkColumn {
    Id,
    RefType,
    RefId,
    Filename,
    Description,
    Unknown,
}

impl ColumnMeta for AttachmentLinkColumn {
    fn name(self) -> &'static str {
        match self {
            AttachmentLinkColumn::Id => "id",
            AttachmentLinkColumn::RefType => "ref_type",
            AttachmentLinkColumn::RefId => "ref_id",
            AttachmentLinkColumn::Filename => "filename",
            AttachmentLinkColumn::Description => "description",
            AttachmentLinkColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => AttachmentLinkColumn::Id,
            "ref_type" => AttachmentLinkColumn::RefType,
            "ref_id" => AttachmentLinkColumn::RefId,
            "filename" => AttachmentLinkColumn::Filename,
            "description" => AttachmentLinkColumn::Description,
            _ => AttachmentLinkColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        AttachmentLinkColumn::Unknown
    }
}

impl Entity for AttachmentLink {
    type Column = AttachmentLinkColumn;

    const TABLE: &'static str = "attachment_links";
    const SELECT_SQL: &'static str =
        "SELECT id, ref_type, ref_id, filename, description FROM attachment_links";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS attachment_links (
                id INTEGER PRIMARY KEY,
                ref_type TEXT NOT NULL,
                ref_id INTEGER NOT NULL,
                filename TEXT NOT NULL,
                description TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_attachment_links_ref
                ON attachment_links (ref_type, ref_id);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(AttachmentLink {
            id: row.get(0)?,
            ref_type: row.get(1)?,
            ref_id: row.get(2)?,
            filename: row.get(3)?,
            description: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO attachment_links (ref_type, ref_id, filename, description)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.ref_type, self.ref_id, self.filename, self.description],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE attachment_links SET ref_type = ?1, ref_id = ?2, filename = ?3,
                 description = ?4
             WHERE id = ?5",
            params![
                self.ref_type,
                self.ref_id,
                self.filename,
                self.description,
                self.id,
            ],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("id", json!(self.id)),
            ("ref_type", json!(self.ref_type)),
            ("ref_id", json!(self.ref_id)),
            ("filename", json!(self.filename)),
            ("description", json!(self.description)),
        ]
    }

    fn matches(&self, predicate: &Predicate<AttachmentLinkColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            AttachmentLinkColumn::Id => v.matches_int(self.id),
            AttachmentLinkColumn::RefType => v.matches_text(&self.ref_type),
            AttachmentLinkColumn::RefId => v.matches_int(self.ref_id),
            AttachmentLinkColumn::Filename => v.matches_text(&self.filename),
            AttachmentLinkColumn::Description => v.matches_text(&self.description),
            AttachmentLinkColumn::Unknown => false,
        }
    }
}

// ── Transfer link ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferLinkColumn {
    Id,
    TransId,
    LinkType,
    LinkRecordId,
    Unknown,
}

impl ColumnMeta for TransferLinkColumn {
    fn name(self) -> &'static str {
        match self {
            TransferLinkColumn::Id => "id",
            TransferLinkColumn::TransId => "trans_id",
            TransferLinkColumn::LinkType => "link_type",
            TransferLinkColumn::LinkRecordId => "link_record_id",
            TransferLinkColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => TransferLinkColumn::Id,
            "trans_id" => TransferLinkColumn::TransId,
            "link_type" => TransferLinkColumn::LinkType,
            "link_record_id" => TransferLinkColumn::LinkRecordId,
            _ => TransferLinkColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        TransferLinkColumn::Unknown
    }
}

impl Entity for TransferLink {
    type Column = TransferLinkColumn;

    const TABLE: &'static str = "transfer_links";
    const SELECT_SQL: &'static str =
        "SELECT id, trans_id, link_type, link_record_id FROM transfer_links";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS transfer_links (
                id INTEGER PRIMARY KEY,
                trans_id INTEGER NOT NULL,
                link_type TEXT NOT NULL,
                link_record_id INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_transfer_links_trans ON transfer_links (trans_id);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TransferLink {
            id: row.get(0)?,
            trans_id: row.get(1)?,
            link_type: row.get(2)?,
            link_record_id: row.get(3)?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO transfer_links (trans_id, link_type, link_record_id)
             VALUES (?1, ?2, ?3)",
            params![self.trans_id, self.link_type, self.link_record_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE transfer_links SET trans_id = ?1, link_type = ?2, link_record_id = ?3
             WHERE id = ?4",
            params![self.trans_id, self.link_type, self.link_record_id, self.id],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("id", json!(self.id)),
            ("trans_id", json!(self.trans_id)),
            ("link_type", json!(self.link_type)),
            ("link_record_id", json!(self.link_record_id)),
        ]
    }

    fn matches(&self, predicate: &Predicate<TransferLinkColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            TransferLinkColumn::Id => v.matches_int(self.id),
            TransferLinkColumn::TransId => v.matches_int(self.trans_id),
            TransferLinkColumn::LinkType => v.matches_text(&self.link_type),
            TransferLinkColumn::LinkRecordId => v.matches_int(self.link_record_id),
            TransferLinkColumn::Unknown => false,
        }
    }
}

// ── Account ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountColumn {
    Id,
    Name,
    InitialBalance,
    Unknown,
}

impl ColumnMeta for AccountColumn {
    fn name(self) -> &'static str {
        match self {
            AccountColumn::Id => "id",
            AccountColumn::Name => "name",
            AccountColumn::InitialBalance => "initial_balance",
            AccountColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => AccountColumn::Id,
            "name" => AccountColumn::Name,
            "initial_balance" => AccountColumn::InitialBalance,
            _ => AccountColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        AccountColumn::Unknown
    }
}

impl Entity for Account {
    type Column = AccountColumn;

    const TABLE: &'static str = "accounts";
    const SELECT_SQL: &'static str = "SELECT id, name, initial_balance FROM accounts";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS accounts (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                initial_balance REAL NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS idx_accounts_name ON accounts (name);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Account {
            id: row.get(0)?,
            name: row.get(1)?,
            initial_balance: row.get(2)?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO accounts (name, initial_balance) VALUES (?1, ?2)",
            params![self.name, self.initial_balance],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE accounts SET name = ?1, initial_balance = ?2 WHERE id = ?3",
            params![self.name, self.initial_balance, self.id],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("id", json!(self.id)),
            ("name", json!(self.name)),
            ("initial_balance", json!(self.initial_balance)),
        ]
    }

    fn matches(&self, predicate: &Predicate<AccountColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            AccountColumn::Id => v.matches_int(self.id),
            AccountColumn::Name => v.matches_text(&self.name),
            AccountColumn::InitialBalance => v.matches_real(self.initial_balance),
            AccountColumn::Unknown => false,
        }
    }
}

// ── Payee ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayeeColumn {
    Id,
    Name,
    Unknown,
}

impl ColumnMeta for PayeeColumn {
    fn name(self) -> &'static str {
        match self {
            PayeeColumn::Id => "id",
            PayeeColumn::Name => "name",
            PayeeColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => PayeeColumn::Id,
            "name" => PayeeColumn::Name,
            _ => PayeeColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        PayeeColumn::Unknown
    }
}

impl Entity for Payee {
    type Column = PayeeColumn;

    const TABLE: &'static str = "payees";
    const SELECT_SQL: &'static str = "SELECT id, name FROM payees";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS payees (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_payees_name ON payees (name);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Payee {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute("INSERT INTO payees (name) VALUES (?1)", params![self.name])?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE payees SET name = ?1 WHERE id = ?2",
            params![self.name, self.id],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![("id", json!(self.id)), ("name", json!(self.name))]
    }

    fn matches(&self, predicate: &Predicate<PayeeColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            PayeeColumn::Id => v.matches_int(self.id),
            PayeeColumn::Name => v.matches_text(&self.name),
            PayeeColumn::Unknown => false,
        }
    }
}

// ── Category / subcategory ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryColumn {
    Id,
    Name,
    Unknown,
}

impl ColumnMeta for CategoryColumn {
    fn name(self) -> &'static str {
        match self {
            CategoryColumn::Id => "id",
            CategoryColumn::Name => "name",
            CategoryColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => CategoryColumn::Id,
            "name" => CategoryColumn::Name,
            _ => CategoryColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        CategoryColumn::Unknown
    }
}

impl Entity for Category {
    type Column = CategoryColumn;

    const TABLE: &'static str = "categories";
    const SELECT_SQL: &'static str = "SELECT id, name FROM categories";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_categories_name ON categories (name);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO categories (name) VALUES (?1)",
            params![self.name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE categories SET name = ?1 WHERE id = ?2",
            params![self.name, self.id],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![("id", json!(self.id)), ("name", json!(self.name))]
    }

    fn matches(&self, predicate: &Predicate<CategoryColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            CategoryColumn::Id => v.matches_int(self.id),
            CategoryColumn::Name => v.matches_text(&self.name),
            CategoryColumn::Unknown => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcategoryColumn {
    Id,
    CategoryId,
    Name,
    Unknown,
}

impl ColumnMeta for SubcategoryColumn {
    fn name(self) -> &'static str {
        match self {
            SubcategoryColumn::Id => "id",
            SubcategoryColumn::CategoryId => "category_id",
            SubcategoryColumn::Name => "name",
            SubcategoryColumn::Unknown => "UNKNOWN",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "id" => SubcategoryColumn::Id,
            "category_id" => SubcategoryColumn::CategoryId,
            "name" => SubcategoryColumn::Name,
            _ => SubcategoryColumn::Unknown,
        }
    }

    fn unknown() -> Self {
        SubcategoryColumn::Unknown
    }
}

impl Entity for Subcategory {
    type Column = SubcategoryColumn;

    const TABLE: &'static str = "subcategories";
    const SELECT_SQL: &'static str = "SELECT id, category_id, name FROM subcategories";

    fn ensure_table(conn: &Connection) -> rusqlite::Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS subcategories (
                id INTEGER PRIMARY KEY,
                category_id INTEGER NOT NULL,
                name TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_subcategories_category
                ON subcategories (category_id);",
        )
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Subcategory {
            id: row.get(0)?,
            category_id: row.get(1)?,
            name: row.get(2)?,
        })
    }

    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64> {
        conn.execute(
            "INSERT INTO subcategories (category_id, name) VALUES (?1, ?2)",
            params![self.category_id, self.name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, conn: &Connection) -> rusqlite::Result<usize> {
        conn.execute(
            "UPDATE subcategories SET category_id = ?1, name = ?2 WHERE id = ?3",
            params![self.category_id, self.name, self.id],
        )
    }

    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            ("id", json!(self.id)),
            ("category_id", json!(self.category_id)),
            ("name", json!(self.name)),
        ]
    }

    fn matches(&self, predicate: &Predicate<SubcategoryColumn>) -> bool {
        let v = &predicate.value;
        match predicate.column {
            SubcategoryColumn::Id => v.matches_int(self.id),
            SubcategoryColumn::CategoryId => v.matches_int(self.category_id),
            SubcategoryColumn::Name => v.matches_text(&self.name),
            SubcategoryColumn::Unknown => false,
        }
    }
}
