//! Reference-data types served by the catalog endpoints.
//!
//! These rows are owned by the surrounding application; the entry workflow
//! only reads ids, names, and default rates from them.

use serde::{Deserialize, Serialize};

use super::document::DocumentKind;

/// Tradable item as exposed by the reference-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    /// Unit of measure shown next to quantities (kg, dozen, ...).
    pub unit: String,
    /// Default rate prefilled when the item is picked; the operator can
    /// override it per line.
    #[serde(default)]
    pub rate: f64,
}

/// Supplier reference row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
}

/// Customer reference row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

/// Ledger account reference row (cash, bank, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
}

/// Reference data fetched once when a form session begins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<Item>,
    pub suppliers: Vec<Supplier>,
    pub customers: Vec<Customer>,
    pub accounts: Vec<Account>,
}

impl Catalog {
    pub fn item(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn supplier(&self, id: i64) -> Option<&Supplier> {
        self.suppliers.iter().find(|supplier| supplier.id == id)
    }

    pub fn customer(&self, id: i64) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    /// Name of the party a document of `kind` would be raised against, or
    /// `None` when the id is not in the catalog.
    pub fn party_name(&self, kind: DocumentKind, id: i64) -> Option<&str> {
        match kind {
            DocumentKind::Purchase => self.supplier(id).map(|s| s.name.as_str()),
            DocumentKind::Sale => self.customer(id).map(|c| c.name.as_str()),
        }
    }
}
