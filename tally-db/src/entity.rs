//! The `Entity` trait and typed column predicates.
//!
//! Every persistent record type implements [`Entity`], which carries the
//! table metadata (name, column mapping, DDL) and the row/statement
//! bindings the generic [`crate::store::EntityStore`] needs. Predicates
//! are evaluated in memory against cached records; they never touch SQL.

use rusqlite::{Connection, Row};
use serde::Serialize;

/// Per-entity column enumeration with a total, default-valued mapping
/// in both directions. Generic consumers (export, dynamic order-by)
/// pass arbitrary input through this mapping, so unknown values resolve
/// to a sentinel instead of failing.
pub trait ColumnMeta: Copy + Eq + std::fmt::Debug {
    /// Column name as it appears in the schema; the unknown sentinel
    /// maps to `"UNKNOWN"`.
    fn name(self) -> &'static str;

    /// Inverse of [`ColumnMeta::name`]; unrecognized names yield the
    /// unknown sentinel.
    fn from_name(name: &str) -> Self;

    /// The sentinel column standing in for malformed input.
    fn unknown() -> Self;
}

/// A persistent record type bound to one SQLite table.
pub trait Entity: Clone + Default + Serialize {
    type Column: ColumnMeta;

    /// Backing table name.
    const TABLE: &'static str;

    /// `SELECT <columns> FROM <table>` with no trailing clauses; the
    /// store appends `WHERE`/`ORDER BY` as needed.
    const SELECT_SQL: &'static str;

    /// Create the table and its indexes if absent. Idempotent.
    fn ensure_table(conn: &Connection) -> rusqlite::Result<()>;

    /// Primary key; values below 1 mean new/unsaved.
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);

    /// Materialize a record from a full-column query row.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Insert a new row (primary key omitted) and return the rowid the
    /// store assigned.
    fn insert(&self, conn: &Connection) -> rusqlite::Result<i64>;

    /// Update the row with this record's primary key, returning the
    /// affected-row count.
    fn update(&self, conn: &Connection) -> rusqlite::Result<usize>;

    /// Ordered column-name → value form for tabular export.
    fn to_row(&self) -> Vec<(&'static str, serde_json::Value)>;

    /// Evaluate one predicate against this record.
    fn matches(&self, predicate: &Predicate<Self::Column>) -> bool;
}

// ── Predicates ──────────────────────────────────────────────────────────────

/// A typed comparison value.
///
/// Text comparisons are case-insensitive; numeric comparisons are exact.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn matches_int(&self, have: i64) -> bool {
        matches!(self, Value::Int(want) if *want == have)
    }

    pub fn matches_real(&self, have: f64) -> bool {
        matches!(self, Value::Real(want) if *want == have)
    }

    pub fn matches_text(&self, have: &str) -> bool {
        matches!(self, Value::Text(want) if want.to_lowercase() == have.to_lowercase())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Comparison operator. Equality is the only operator the base pattern
/// needs; the field exists so criteria stay a (column, op, value)
/// triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Op {
    #[default]
    Eq,
}

/// An immutable (column, operator, value) search criterion, combined
/// with logical AND by [`crate::store::EntityStore::get_one`].
#[derive(Debug, Clone)]
pub struct Predicate<C> {
    pub column: C,
    pub op: Op,
    pub value: Value,
}

impl<C> Predicate<C> {
    /// Equality predicate on the given column.
    pub fn eq(column: C, value: impl Into<Value>) -> Self {
        Predicate {
            column,
            op: Op::Eq,
            value: value.into(),
        }
    }
}
