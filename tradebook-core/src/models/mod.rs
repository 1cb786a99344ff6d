//! Domain models for the entry workflow.

mod catalog;
mod document;
mod line_item;
mod payment;

pub use catalog::{Account, Catalog, Customer, Item, Supplier};
pub use document::{Document, DocumentKind, DocumentPayload};
pub use line_item::{DeductionPolicy, LineItem, LineItemInput, DEFAULT_PER_BUNCH_DEDUCTION};
pub use payment::{Payment, PaymentInput, PaymentMethod};
