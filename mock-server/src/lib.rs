//! In-memory stand-in for the Pipedrive v1 list endpoints.
//!
//! Serves `GET /api/v1/{resource}` with `start` / `limit` / `api_token` query
//! parameters and answers with the same JSON envelope Pipedrive uses:
//! `{"success": true, "data": [...] | null, "additional_data": {...}}`.
//! Every handled request is appended to a shared log so callers can count
//! round trips.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Page size used when the caller sends no `limit`.
pub const DEFAULT_LIMIT: usize = 100;

/// Largest `limit` the server honours; bigger values are clamped.
pub const MAX_LIMIT: usize = 500;

/// One request as seen by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub resource: String,
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub authorized: bool,
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub start: Option<u32>,
    pub limit: Option<u32>,
    pub api_token: Option<String>,
}

#[derive(Clone)]
struct MockState {
    api_token: Arc<str>,
    collections: Arc<HashMap<String, Vec<Value>>>,
    failures: Arc<HashMap<String, u16>>,
    requests: RequestLog,
}

/// Builder for a mock Pipedrive tenant.
#[derive(Clone, Debug)]
pub struct MockPipedrive {
    api_token: String,
    collections: HashMap<String, Vec<Value>>,
    failures: HashMap<String, u16>,
    requests: RequestLog,
}

impl MockPipedrive {
    pub fn new(api_token: &str) -> Self {
        Self {
            api_token: api_token.to_string(),
            collections: HashMap::new(),
            failures: HashMap::new(),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a collection. Records are served in the given order.
    pub fn with_collection(mut self, resource: &str, records: Vec<Value>) -> Self {
        self.collections.insert(resource.to_string(), records);
        self
    }

    /// Make every authorized request for `resource` answer with `status`.
    pub fn with_failure(mut self, resource: &str, status: u16) -> Self {
        self.failures.insert(resource.to_string(), status);
        self
    }

    /// Handle to the shared request log. Stays valid after `run` consumes
    /// the builder.
    pub fn request_log(&self) -> RequestLog {
        Arc::clone(&self.requests)
    }

    pub fn app(&self) -> Router {
        let state = MockState {
            api_token: Arc::from(self.api_token.as_str()),
            collections: Arc::new(self.collections.clone()),
            failures: Arc::new(self.failures.clone()),
            requests: Arc::clone(&self.requests),
        };
        Router::new()
            .route("/api/v1/{resource}", get(list_items))
            .with_state(state)
    }

    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        axum::serve(listener, self.app()).await
    }
}

/// `count` records shaped like `{"id": n, "name": "<resource> n"}`, ids from 1.
pub fn sample_records(resource: &str, count: usize) -> Vec<Value> {
    (1..=count)
        .map(|id| json!({ "id": id, "name": format!("{resource} {id}") }))
        .collect()
}

async fn list_items(
    State(state): State<MockState>,
    Path(resource): Path<String>,
    Query(params): Query<ListParams>,
) -> (StatusCode, Json<Value>) {
    let authorized = params.api_token.as_deref() == Some(&*state.api_token);
    state.requests.write().await.push(RecordedRequest {
        resource: resource.clone(),
        start: params.start,
        limit: params.limit,
        authorized,
    });

    if !authorized {
        tracing::debug!(%resource, "rejecting request with bad token");
        return error_response(
            StatusCode::UNAUTHORIZED,
            "You need to be authorized to make this request.",
        );
    }

    if let Some(&status) = state.failures.get(&resource) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return error_response(status, "Forced failure.");
    }

    let Some(records) = state.collections.get(&resource) else {
        return error_response(StatusCode::NOT_FOUND, "Unknown method .");
    };

    let start = params.start.unwrap_or(0) as usize;
    let limit = params
        .limit
        .map_or(DEFAULT_LIMIT, |l| (l as usize).min(MAX_LIMIT));
    let page: Vec<Value> = records.iter().skip(start).take(limit).cloned().collect();
    let end = start + page.len();
    let more = end < records.len();

    let mut pagination = json!({
        "start": start,
        "limit": limit,
        "more_items_in_collection": more,
    });
    if more {
        pagination["next_start"] = json!(end);
    }

    // Pipedrive reports an empty slice as `null`, not `[]`.
    let data = if page.is_empty() {
        Value::Null
    } else {
        Value::Array(page)
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": data,
            "additional_data": { "pagination": pagination },
        })),
    )
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "success": false,
            "error": message,
            "errorCode": status.as_u16(),
        })),
    )
}
