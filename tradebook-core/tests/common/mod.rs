//! Shared fixtures for the entry-workflow integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tradebook_core::error::RequestError;
use tradebook_core::models::{
    Account, Catalog, Customer, Document, DocumentKind, DocumentPayload, Item, Supplier,
};
use tradebook_core::sources::{DocumentStore, ReferenceDataSource};

pub const PLANTAIN_ID: i64 = 1;
pub const COCONUT_ID: i64 = 2;
pub const SUPPLIER_ID: i64 = 3;
pub const CUSTOMER_ID: i64 = 4;
pub const OTHER_CUSTOMER_ID: i64 = 6;

/// Catalog used across the test suite.
pub fn test_catalog() -> Catalog {
    Catalog {
        items: vec![
            Item {
                id: PLANTAIN_ID,
                name: "Plantain".to_string(),
                unit: "kg".to_string(),
                rate: 10.0,
            },
            Item {
                id: COCONUT_ID,
                name: "Coconut".to_string(),
                unit: "piece".to_string(),
                rate: 25.0,
            },
        ],
        suppliers: vec![Supplier {
            id: SUPPLIER_ID,
            name: "Green Valley Farms".to_string(),
        }],
        customers: vec![
            Customer {
                id: CUSTOMER_ID,
                name: "City Mart".to_string(),
            },
            Customer {
                id: OTHER_CUSTOMER_ID,
                name: "Lakeside Traders".to_string(),
            },
        ],
        accounts: vec![Account {
            id: 5,
            name: "Cash Book".to_string(),
        }],
    }
}

/// Reference-data source serving a fixed catalog.
pub struct FakeDirectory {
    catalog: Catalog,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self {
            catalog: test_catalog(),
        }
    }
}

#[async_trait]
impl ReferenceDataSource for FakeDirectory {
    async fn catalog(&self) -> Result<Catalog, RequestError> {
        Ok(self.catalog.clone())
    }
}

/// In-memory document store with a one-shot programmable rejection.
pub struct FakeStore {
    documents: Mutex<HashMap<i64, Document>>,
    next_id: AtomicI64,
    reject_next: Mutex<Option<RequestError>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            reject_next: Mutex::new(None),
        }
    }

    /// Make the next create/update call fail with the given error.
    pub fn reject_next(&self, error: RequestError) {
        *self.reject_next.lock().unwrap() = Some(error);
    }

    pub fn get(&self, id: i64) -> Option<Document> {
        self.documents.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    fn take_rejection(&self) -> Option<RequestError> {
        self.reject_next.lock().unwrap().take()
    }
}

fn materialize(id: i64, payload: &DocumentPayload) -> Document {
    Document {
        id,
        supplier_id: payload.supplier_id,
        customer_id: payload.customer_id,
        date: payload.date,
        items: payload.items.clone(),
        payments: payload.payments.clone(),
    }
}

#[async_trait]
impl DocumentStore for FakeStore {
    async fn create(
        &self,
        _kind: DocumentKind,
        payload: &DocumentPayload,
    ) -> Result<Document, RequestError> {
        if let Some(error) = self.take_rejection() {
            return Err(error);
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let document = materialize(id, payload);
        self.documents.lock().unwrap().insert(id, document.clone());
        Ok(document)
    }

    async fn update(
        &self,
        kind: DocumentKind,
        id: i64,
        payload: &DocumentPayload,
    ) -> Result<Document, RequestError> {
        if let Some(error) = self.take_rejection() {
            return Err(error);
        }
        if self.get(id).is_none() {
            return Err(RequestError::api(
                format!("{}/{}", kind.path_segment(), id),
                404,
                "document not found",
                HashMap::new(),
            ));
        }
        let document = materialize(id, payload);
        self.documents.lock().unwrap().insert(id, document.clone());
        Ok(document)
    }

    async fn fetch(&self, kind: DocumentKind, id: i64) -> Result<Document, RequestError> {
        self.get(id).ok_or_else(|| {
            RequestError::api(
                format!("{}/{}", kind.path_segment(), id),
                404,
                "document not found",
                HashMap::new(),
            )
        })
    }
}
