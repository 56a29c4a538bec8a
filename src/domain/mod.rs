//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep the canonical bill/order records and report structs in one place.
//! - Own the fixed state vocabulary and the static party-control table.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: bill, executive order, report/output structs.
//! - `states.rs`: state code vocabulary, name table, resolver, party control.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and the artifacts
//! written by `extract`. Keep them synchronized with `docs/contracts/*`.

pub mod models;
pub mod states;
