//! SQLite persistence layer for the finance ledger.
//!
//! Provides schema creation, the generic cached entity store (identity
//! map + write-through CRUD), typed column predicates, and the
//! multi-table `Ledger` coordinator, backed by SQLite (via rusqlite
//! with bundled feature).

pub mod entities;
pub mod entity;
pub mod ledger;
pub mod schema;
pub mod store;

pub use entities::{
    AccountColumn, AttachmentLinkColumn, CategoryColumn, PayeeColumn, SplitLineColumn,
    SubcategoryColumn, TransactionColumn, TransferLinkColumn,
};
pub use entity::{ColumnMeta, Entity, Op, Predicate, Value};
pub use ledger::Ledger;
pub use schema::{ensure_schema, open_database, open_memory, open_read_only, SchemaError};
pub use store::{CacheStats, Cached, EntityStore};
