//! In-process fake of the application's API routes.
//!
//! Purchases behave: create and update echo the payload back with an id
//! and record the body they received. Sales are wired to misbehave so the
//! error paths can be exercised: creating one is always rejected with
//! field errors and fetching one returns a body that is not JSON.

use std::sync::{Arc, Mutex, Once};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tradebook_client::{telemetry, ApiClient};

static TRACING: Once = Once::new();

/// Install the tracing subscriber once per test binary.
fn init_test_tracing() {
    TRACING.call_once(|| {
        telemetry::init_tracing("info,tradebook_client=debug", false);
    });
}

pub const PLANTAIN_ID: i64 = 1;
pub const SUPPLIER_ID: i64 = 3;
pub const CUSTOMER_ID: i64 = 4;
pub const STORED_PURCHASE_ID: i64 = 7;
pub const CREATED_PURCHASE_ID: i64 = 101;
/// Supplier whose balance endpoint answers 500 with a plain-text body.
pub const OFFLINE_SUPPLIER_ID: i64 = 999;

#[derive(Clone, Default)]
struct BackendState {
    captured: Arc<Mutex<Vec<Value>>>,
}

pub struct TestBackend {
    pub base_url: String,
    state: BackendState,
}

impl TestBackend {
    pub async fn spawn() -> Self {
        init_test_tracing();

        let state = BackendState::default();
        let router = Router::new()
            .route("/items", get(list_items))
            .route("/suppliers", get(list_suppliers))
            .route("/customers", get(list_customers))
            .route("/accounts", get(list_accounts))
            .route("/suppliers/:id/balance", get(supplier_balance))
            .route("/customers/:id/balance", get(customer_balance))
            .route("/purchases", post(create_purchase))
            .route("/purchases/:id", put(update_purchase).get(fetch_purchase))
            .route("/sales", post(create_sale))
            .route("/sales/:id", get(fetch_sale))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.ok();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::from_base_url(&self.base_url).expect("Failed to build client")
    }

    /// Bodies received by the create/update routes, in arrival order.
    pub fn captured(&self) -> Vec<Value> {
        self.state.captured.lock().unwrap().clone()
    }
}

async fn list_items() -> Json<Value> {
    Json(json!([
        { "id": PLANTAIN_ID, "name": "Plantain", "unit": "kg", "rate": 10.0 },
        { "id": 2, "name": "Coconut", "unit": "piece", "rate": 25.0 }
    ]))
}

async fn list_suppliers() -> Json<Value> {
    Json(json!([
        { "id": SUPPLIER_ID, "name": "Green Valley Farms" },
        { "id": OFFLINE_SUPPLIER_ID, "name": "Hilltop Growers" }
    ]))
}

async fn list_customers() -> Json<Value> {
    Json(json!([{ "id": CUSTOMER_ID, "name": "City Mart" }]))
}

async fn list_accounts() -> Json<Value> {
    Json(json!([{ "id": 5, "name": "Cash Book" }]))
}

async fn supplier_balance(Path(id): Path<i64>) -> Response {
    if id == OFFLINE_SUPPLIER_ID {
        return (StatusCode::INTERNAL_SERVER_ERROR, "ledger offline").into_response();
    }
    Json(json!({ "balance": 150.0 })).into_response()
}

async fn customer_balance(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!({ "balance": -40.25 }))
}

async fn create_purchase(
    State(state): State<BackendState>,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.captured.lock().unwrap().push(payload.clone());
    let mut document = payload;
    document["id"] = json!(CREATED_PURCHASE_ID);
    (StatusCode::CREATED, Json(document))
}

async fn update_purchase(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    state.captured.lock().unwrap().push(payload.clone());
    let mut document = payload;
    document["id"] = json!(id);
    Json(document)
}

async fn fetch_purchase(Path(id): Path<i64>) -> Response {
    if id != STORED_PURCHASE_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "document not found" })),
        )
            .into_response();
    }
    Json(json!({
        "id": STORED_PURCHASE_ID,
        "supplierId": SUPPLIER_ID,
        "date": "2024-05-01",
        "items": [{
            "itemId": PLANTAIN_ID,
            "name": "Plantain",
            "unit": "kg",
            "quantity": 20.0,
            "rate": 10.0,
            "numberOfBunches": 2,
            "weightDeduction": 3.0,
            "effectiveQuantity": 17.0,
            "amount": 170.0
        }],
        "payments": [{ "amount": 100.0, "method": "CASH" }]
    }))
    .into_response()
}

async fn create_sale() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "validation failed",
            "errors": { "date": "date is in a closed period" }
        })),
    )
}

async fn fetch_sale(Path(_id): Path<i64>) -> (StatusCode, &'static str) {
    // The web layer answering with a login page instead of JSON.
    (StatusCode::OK, "<!doctype html><p>login required</p>")
}
