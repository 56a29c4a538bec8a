//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `ingest.rs`: orders/bills/stats, everything that needs a loaded session.
//! - `reference.rs`: party/resolve/extract/sponsors, no order index needed.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate ingestion logic to `eobills::services`.
//! - Keep behavior and output schema stable.

pub mod ingest;
pub mod reference;

pub use ingest::handle_ingest_commands;
pub use reference::handle_reference_commands;
