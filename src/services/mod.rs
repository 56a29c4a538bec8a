//! Service layer containing ingestion logic and side-effect helpers.
//!
//! ## Service map
//! - `source.rs`: data file access (local dir or HTTP base URL).
//! - `orders.rs`: order index parsing, slugs, date parsing, newest-first sort.
//! - `normalize.rs`: CSV parsing and row → bill normalization with reject reasons.
//! - `sponsors.rs`: sponsor list splitting and party marker extraction.
//! - `pipeline.rs`: session state machine and the published state→bills index.
//! - `stats.rs`: per-state aggregates computed from a published index.
//! - `billtrack.rs`: BillTrack50 sponsor/legislator lookups.
//! - `extract.rs`: one-shot bill mapping precompute.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod billtrack;
pub mod extract;
pub mod normalize;
pub mod orders;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod sponsors;
pub mod stats;
