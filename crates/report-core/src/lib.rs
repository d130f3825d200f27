//! Shared domain types for the usage report workspace.
//!
//! Holds the canonical record model, the error type, the key-mapping schema
//! tables used by extraction and normalization, number formatting, and the
//! command-line settings.

pub mod error;
pub mod formatting;
pub mod models;
pub mod schema;
pub mod settings;
