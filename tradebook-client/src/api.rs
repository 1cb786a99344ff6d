//! HTTP/JSON client for the application's API routes.
//!
//! Implements the collaborator contracts from `tradebook-core` against the
//! REST endpoints the web layer exposes: reference-data lists, party
//! balances, and the purchase/sale document store.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use tradebook_core::error::RequestError;
use tradebook_core::models::{
    Account, Catalog, Customer, Document, DocumentKind, DocumentPayload, Item, Supplier,
};
use tradebook_core::sources::{BalanceSnapshot, BalanceSource, DocumentStore, ReferenceDataSource};

use crate::config::Config;

/// Client for the application's API routes.
///
/// Constructed explicitly and passed to whatever needs it; nothing here is
/// process-global. The connection pool closes when the last clone drops.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Error body returned by the API routes: a general message plus optional
/// field-level errors keyed by form field.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    errors: HashMap<String, String>,
}

impl ApiClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::from_base_url(&config.api_base_url)
    }

    /// Build a client against an explicit base URL, validating it up front
    /// so a malformed URL fails at construction instead of on first use.
    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).with_context(|| format!("invalid API base URL: {base_url}"))?;

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and map the response onto the three request-error
    /// cases: transport failure, non-success status, undecodable body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, RequestError> {
        let response = request
            .send()
            .await
            .map_err(|error| RequestError::transport(endpoint, error))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| RequestError::transport(endpoint, error))?;

        tracing::debug!(endpoint, status = %status, "api response");

        if !status.is_success() {
            let error: ApiErrorBody =
                serde_json::from_str(&body).unwrap_or_else(|_| ApiErrorBody {
                    message: if body.trim().is_empty() {
                        format!("request failed with status {status}")
                    } else {
                        body.clone()
                    },
                    errors: HashMap::new(),
                });
            tracing::error!(
                endpoint,
                status = %status,
                message = %error.message,
                "api request failed"
            );
            return Err(RequestError::api(
                endpoint,
                status.as_u16(),
                error.message,
                error.errors,
            ));
        }

        serde_json::from_str(&body).map_err(|error| RequestError::decode(endpoint, error))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
        let endpoint = self.endpoint(path);
        self.execute(self.client.get(&endpoint), &endpoint).await
    }
}

#[async_trait]
impl ReferenceDataSource for ApiClient {
    async fn catalog(&self) -> Result<Catalog, RequestError> {
        let items: Vec<Item> = self.get("items").await?;
        let suppliers: Vec<Supplier> = self.get("suppliers").await?;
        let customers: Vec<Customer> = self.get("customers").await?;
        let accounts: Vec<Account> = self.get("accounts").await?;

        tracing::info!(
            items = items.len(),
            suppliers = suppliers.len(),
            customers = customers.len(),
            accounts = accounts.len(),
            "catalog loaded"
        );

        Ok(Catalog {
            items,
            suppliers,
            customers,
            accounts,
        })
    }
}

#[async_trait]
impl BalanceSource for ApiClient {
    async fn party_balance(
        &self,
        kind: DocumentKind,
        party_id: i64,
    ) -> Result<BalanceSnapshot, RequestError> {
        self.get(&format!(
            "{}/{}/balance",
            kind.party_path_segment(),
            party_id
        ))
        .await
    }
}

#[async_trait]
impl DocumentStore for ApiClient {
    async fn create(
        &self,
        kind: DocumentKind,
        payload: &DocumentPayload,
    ) -> Result<Document, RequestError> {
        let endpoint = self.endpoint(kind.path_segment());
        let document: Document = self
            .execute(self.client.post(&endpoint).json(payload), &endpoint)
            .await?;

        tracing::info!(kind = %kind, id = document.id, "document created");
        Ok(document)
    }

    async fn update(
        &self,
        kind: DocumentKind,
        id: i64,
        payload: &DocumentPayload,
    ) -> Result<Document, RequestError> {
        let endpoint = self.endpoint(&format!("{}/{}", kind.path_segment(), id));
        let document: Document = self
            .execute(self.client.put(&endpoint).json(payload), &endpoint)
            .await?;

        tracing::info!(kind = %kind, id = document.id, "document updated");
        Ok(document)
    }

    async fn fetch(&self, kind: DocumentKind, id: i64) -> Result<Document, RequestError> {
        self.get(&format!("{}/{}", kind.path_segment(), id)).await
    }
}
