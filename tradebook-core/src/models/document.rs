//! Purchase and sale documents plus their wire payloads.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::line_item::LineItem;
use super::payment::Payment;
use crate::validation;

/// Which side of the book a document sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Purchase,
    Sale,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Purchase => "purchase",
            DocumentKind::Sale => "sale",
        }
    }

    /// Collection segment used in endpoint paths.
    pub fn path_segment(&self) -> &'static str {
        match self {
            DocumentKind::Purchase => "purchases",
            DocumentKind::Sale => "sales",
        }
    }

    /// Field name used when reporting a missing counterparty.
    pub fn party_field(&self) -> &'static str {
        match self {
            DocumentKind::Purchase => "supplier",
            DocumentKind::Sale => "customer",
        }
    }

    /// Collection segment of the counterparty's endpoints.
    pub fn party_path_segment(&self) -> &'static str {
        match self {
            DocumentKind::Purchase => "suppliers",
            DocumentKind::Sale => "customers",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Document as returned by the backend.
///
/// Purchases carry `supplier_id`, sales carry `customer_id`; the other
/// field stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

impl Document {
    pub fn total_amount(&self) -> f64 {
        validation::total_amount(&self.items)
    }

    pub fn total_paid(&self) -> f64 {
        validation::total_paid(&self.payments)
    }

    pub fn balance_due(&self) -> f64 {
        self.total_amount() - self.total_paid()
    }

    /// Counterparty id for the given side of the book.
    pub fn party_id(&self, kind: DocumentKind) -> Option<i64> {
        match kind {
            DocumentKind::Purchase => self.supplier_id,
            DocumentKind::Sale => self.customer_id,
        }
    }
}

/// Body sent when creating or updating a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    pub date: NaiveDate,
    pub items: Vec<LineItem>,
    pub payments: Vec<Payment>,
}

impl DocumentPayload {
    pub fn new(
        kind: DocumentKind,
        party_id: i64,
        date: NaiveDate,
        items: Vec<LineItem>,
        payments: Vec<Payment>,
    ) -> Self {
        let (supplier_id, customer_id) = match kind {
            DocumentKind::Purchase => (Some(party_id), None),
            DocumentKind::Sale => (None, Some(party_id)),
        };

        Self {
            supplier_id,
            customer_id,
            date,
            items,
            payments,
        }
    }
}
