//! Contracts for the collaborators the entry workflow calls over the wire.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::models::{Catalog, Document, DocumentKind, DocumentPayload};

/// Read-only reference data, fetched once per form session.
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    async fn catalog(&self) -> Result<Catalog, RequestError>;
}

/// Current balance of a counterparty account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub balance: f64,
}

#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn party_balance(
        &self,
        kind: DocumentKind,
        party_id: i64,
    ) -> Result<BalanceSnapshot, RequestError>;
}

/// Persistence endpoint for purchase and sale documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(
        &self,
        kind: DocumentKind,
        payload: &DocumentPayload,
    ) -> Result<Document, RequestError>;

    async fn update(
        &self,
        kind: DocumentKind,
        id: i64,
        payload: &DocumentPayload,
    ) -> Result<Document, RequestError>;

    async fn fetch(&self, kind: DocumentKind, id: i64) -> Result<Document, RequestError>;
}

/// Supersede guard for balance lookups fired by rapid party changes.
///
/// Each call takes the next token; a response whose token is no longer the
/// latest is dropped as `Ok(None)`, never merged. Errors from superseded
/// requests are dropped the same way, since the operator has already moved
/// on to a newer lookup.
#[derive(Debug, Default)]
pub struct BalanceLoader {
    current: AtomicU64,
}

impl BalanceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load<S>(
        &self,
        source: &S,
        kind: DocumentKind,
        party_id: i64,
    ) -> Result<Option<BalanceSnapshot>, RequestError>
    where
        S: BalanceSource + ?Sized,
    {
        let token = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        let result = source.party_balance(kind, party_id).await;

        if self.current.load(Ordering::SeqCst) != token {
            tracing::debug!(token, party_id, "dropping superseded balance response");
            return Ok(None);
        }
        result.map(Some)
    }
}
