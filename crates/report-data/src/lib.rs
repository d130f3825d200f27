//! Data layer for the usage report.
//!
//! Loads raw JSON payloads, walks their envelopes to find the record list,
//! normalizes each record into a canonical [`report_core::models::UsageRecord`]
//! and ranks the result by estimate volume.

pub mod extractor;
pub mod normalizer;
pub mod ranking;
pub mod reader;

pub use report_core as core;
