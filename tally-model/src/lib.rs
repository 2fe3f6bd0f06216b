//! Ledger data model types.
//!
//! This crate defines the persistent data model for the finance ledger
//! without any database dependencies. Consumers can use these types
//! directly for serialization or display, or pass them to `tally-db`
//! for persistence.

pub mod types;

pub use types::*;
