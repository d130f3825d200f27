//! Presentation layer for the usage report.
//!
//! Turns canonical records into the flat export row sequence and into one of
//! the narrative digest formats. Every renderer here is a pure function:
//! degenerate input produces a defined fallback text, never an error.

pub mod digest;
pub mod export;
pub mod table;

pub use report_core as core;
