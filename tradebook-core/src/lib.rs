//! tradebook-core: document-entry domain for the tradebook trading ledger.
//!
//! This crate owns the purchase/sale entry workflow: the reference catalog,
//! the line-item and payment editors with their running totals, the entry
//! session that assembles and submits a document, and the contracts the
//! surrounding application implements to reach its reference-data, balance,
//! and persistence endpoints. It has no HTTP or database dependencies of its
//! own; `tradebook-client` provides the HTTP implementations.

pub mod entry;
pub mod error;
pub mod models;
pub mod sources;
pub mod validation;

pub use error::{EntryError, RequestError};
