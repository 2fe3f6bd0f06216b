//! The multi-table transaction coordinator.
//!
//! `Ledger` owns one entity store per table plus the shared connection,
//! and groups a primary transaction mutation with its dependents
//! (split lines, attachment links, transfer links) into one
//! all-or-nothing unit. The discipline is fixed: open a savepoint on
//! every involved store before any mutation, mutate, then release in
//! reverse order only once every step has succeeded.

use std::path::Path;
use std::rc::Rc;

use rusqlite::Connection;

use crate::entity::Entity;
use crate::schema::{self, SchemaError};
use crate::store::EntityStore;
use tally_model::{
    Account, AttachmentLink, Category, Payee, SplitLine, Subcategory, Transaction, TransferLink,
    ATTACHMENT_REF_TRANSACTION,
};

pub struct Ledger {
    pub transactions: EntityStore<Transaction>,
    pub splits: EntityStore<SplitLine>,
    pub attachments: EntityStore<AttachmentLink>,
    pub transfer_links: EntityStore<TransferLink>,
    pub accounts: EntityStore<Account>,
    pub payees: EntityStore<Payee>,
    pub categories: EntityStore<Category>,
    pub subcategories: EntityStore<Subcategory>,
    conn: Rc<Connection>,
}

impl Ledger {
    pub fn new(conn: Rc<Connection>) -> Self {
        Ledger {
            transactions: EntityStore::new(conn.clone()),
            splits: EntityStore::new(conn.clone()),
            attachments: EntityStore::new(conn.clone()),
            transfer_links: EntityStore::new(conn.clone()),
            accounts: EntityStore::new(conn.clone()),
            payees: EntityStore::new(conn.clone()),
            categories: EntityStore::new(conn.clone()),
            subcategories: EntityStore::new(conn.clone()),
            conn,
        }
    }

    /// Open or create a ledger database at the given path.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self::new(Rc::new(schema::open_database(path)?)))
    }

    /// Open an in-memory ledger. Useful for testing.
    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self::new(Rc::new(schema::open_memory()?)))
    }

    /// Open an existing ledger read-only; saves will be rejected at
    /// the store boundary.
    pub fn open_read_only(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self::new(Rc::new(schema::open_read_only(path)?)))
    }

    /// Create all tables and indexes if absent. Idempotent; failures
    /// are logged and surface as `false` so startup can continue.
    pub fn ensure_schema(&self) -> bool {
        schema::ensure_schema(&self.conn)
    }

    pub fn connection(&self) -> &Rc<Connection> {
        &self.conn
    }

    // ── Dependent lookups ───────────────────────────────────────────────────

    /// Split lines belonging to a transaction.
    pub fn splits_for(&self, trans_id: i64) -> Vec<SplitLine> {
        self.splits
            .all(None, true)
            .into_iter()
            .filter(|s| s.trans_id == trans_id)
            .collect()
    }

    /// Attachment links referencing a transaction.
    pub fn attachments_for(&self, trans_id: i64) -> Vec<AttachmentLink> {
        self.attachments
            .all(None, true)
            .into_iter()
            .filter(|a| a.ref_type == ATTACHMENT_REF_TRANSACTION && a.ref_id == trans_id)
            .collect()
    }

    /// The transfer-link row for a transaction, if one exists.
    pub fn transfer_link_for(&self, trans_id: i64) -> Option<TransferLink> {
        self.transfer_links
            .all(None, true)
            .into_iter()
            .find(|l| l.trans_id == trans_id)
    }

    // ── Cascading removal ───────────────────────────────────────────────────

    /// Remove a transaction together with its split lines, attachment
    /// links, and transfer link, atomically.
    ///
    /// Returns `false` without touching anything for an unsaved id; on
    /// a mid-cascade failure the savepoints are rolled back so the
    /// primary row is never deleted without its dependents.
    pub fn remove_transaction(&mut self, id: i64) -> bool {
        if id <= 0 {
            return false;
        }
        if !self.begin_unit() {
            return false;
        }
        if self.remove_cascade(id) {
            self.commit_unit()
        } else {
            self.abort_unit();
            false
        }
    }

    /// Remove a batch of transactions (with full cascades) inside a
    /// single savepoint unit, so the whole batch commits or rolls back
    /// together.
    pub fn remove_transactions(&mut self, ids: &[i64]) -> bool {
        if ids.is_empty() {
            return true;
        }
        if !self.begin_unit() {
            return false;
        }
        for &id in ids {
            if !self.remove_cascade(id) {
                self.abort_unit();
                return false;
            }
        }
        self.commit_unit()
    }

    /// One record's cascade, assuming savepoints are already open.
    fn remove_cascade(&mut self, id: i64) -> bool {
        for split in self.splits_for(id) {
            if !self.splits.remove(split.id) {
                return false;
            }
        }
        for link in self.attachments_for(id) {
            if !self.attachments.remove(link.id) {
                return false;
            }
        }
        if let Some(link) = self.transfer_link_for(id) {
            if !self.transfer_links.remove(link.id) {
                return false;
            }
        }
        self.transactions.remove(id)
    }

    // ── Duplication ─────────────────────────────────────────────────────────

    /// Clone a transaction and its split lines, relinking the split
    /// copies to the new row, inside one savepoint unit. The copy's
    /// date can be overridden (paste-as-today); `None` keeps the
    /// original date. Returns the new transaction id.
    pub fn duplicate_transaction(
        &mut self,
        id: i64,
        date_override: Option<&str>,
    ) -> Option<i64> {
        let source = self.transactions.get(id)?;
        let snapshot = source.borrow().clone();

        if !self.begin_unit() {
            return None;
        }

        let copy = self.transactions.clone_record(&snapshot);
        if let Some(date) = date_override {
            copy.borrow_mut().date = date.to_string();
        }
        if !self.transactions.save(&copy) {
            self.abort_unit();
            return None;
        }
        let new_id = copy.borrow().id();

        for split in self.splits_for(id) {
            let split_copy = self.splits.clone_record(&split);
            split_copy.borrow_mut().trans_id = new_id;
            if !self.splits.save(&split_copy) {
                self.abort_unit();
                return None;
            }
        }

        if self.commit_unit() {
            Some(new_id)
        } else {
            None
        }
    }

    // ── Savepoint unit spanning every involved store ────────────────────────

    fn begin_unit(&self) -> bool {
        if !self.transactions.savepoint() {
            return false;
        }
        if !self.attachments.savepoint() {
            self.transactions.rollback_savepoint();
            self.transactions.release_savepoint();
            return false;
        }
        if !self.splits.savepoint() {
            self.attachments.rollback_savepoint();
            self.attachments.release_savepoint();
            self.transactions.rollback_savepoint();
            self.transactions.release_savepoint();
            return false;
        }
        if !self.transfer_links.savepoint() {
            self.splits.rollback_savepoint();
            self.splits.release_savepoint();
            self.attachments.rollback_savepoint();
            self.attachments.release_savepoint();
            self.transactions.rollback_savepoint();
            self.transactions.release_savepoint();
            return false;
        }
        true
    }

    /// Release in reverse order of `begin_unit`.
    fn commit_unit(&self) -> bool {
        let mut ok = self.transfer_links.release_savepoint();
        ok &= self.splits.release_savepoint();
        ok &= self.attachments.release_savepoint();
        ok &= self.transactions.release_savepoint();
        ok
    }

    /// Roll back and release in reverse order of `begin_unit`.
    ///
    /// Cache entries purged before the failing step may now diverge
    /// from the backing store; the divergence heals on the next
    /// startup when caches rebuild from disk.
    fn abort_unit(&self) {
        self.transfer_links.rollback_savepoint();
        self.transfer_links.release_savepoint();
        self.splits.rollback_savepoint();
        self.splits.release_savepoint();
        self.attachments.rollback_savepoint();
        self.attachments.release_savepoint();
        self.transactions.rollback_savepoint();
        self.transactions.release_savepoint();
    }
}
