//! Executive order → state bill ingestion.
//!
//! Loads an executive-order index, fetches the bill sheet for a selected
//! order, normalizes each row into a [`Bill`](domain::models::Bill) and
//! publishes an immutable state→bills index through a
//! [`Session`](services::pipeline::Session).

pub mod config;
pub mod domain;
pub mod error;
pub mod services;

pub use domain::models::{Bill, ExecutiveOrder, IngestReport, Party, Position};
pub use domain::states::{resolve, StateCode};
pub use error::IngestError;
pub use services::pipeline::{Completion, Phase, Session, StateBillIndex, Ticket};
pub use services::source::{DataSource, SheetSource};
