//! Runtime layer for the usage report.
//!
//! Hosts the engine entry point ([`engine::build_report`]), the collaborator
//! seams around it (payload sources, export writers, digest notifiers) and the
//! orchestrator that wires one report run together.

pub mod config;
pub mod engine;
pub mod export_writer;
pub mod notifier;
pub mod orchestrator;
pub mod sources;

pub use report_core as core;
pub use report_data as data;
pub use report_render as render;
