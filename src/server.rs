//! HTTP front door of the generator service.
//!
//! Routes:
//! - `GET /` liveness
//! - `POST /schemas` register or replace a schema
//! - `GET /schemas` list schema names
//! - `GET /schemas/:name` show one schema
//! - `DELETE /schemas/:name` remove a schema
//! - `GET /schemas/:name/data` generate the schema's records

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use record_core::{write_records, OutputFormat, Schema};
use record_generator::{AgeRange, FakeProvider, RecordGenerator};
use schema_store::{SchemaStore, StoreError};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

const NDJSON: &str = "application/x-ndjson";

/// Shared state of the front door.
#[derive(Clone)]
pub struct AppState {
    store: Arc<SchemaStore>,
    ages: AgeRange,
}

impl AppState {
    pub fn new(store: SchemaStore, ages: AgeRange) -> Self {
        Self {
            store: Arc::new(store),
            ages,
        }
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }
}

/// Error response carrying a `{"error": ...}` body.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    fn not_found(name: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Schema '{name}' not found"),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Invalid(invalid) => Self::bad_request(invalid.to_string()),
            other => {
                error!("Schema store failure: {other}");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Build the router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/schemas", get(list_schemas).post(create_schema))
        .route("/schemas/:name", get(show_schema).delete(delete_schema))
        .route("/schemas/:name/data", get(generate_data))
        .with_state(state)
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(
        "Generator service listening on {} ({})",
        listener.local_addr()?,
        state.store.describe()
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn index() -> Json<Value> {
    Json(json!({ "message": "Record generator is running" }))
}

async fn create_schema(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    // Parsed by hand so malformed bodies get the same error shape.
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Request body is not valid JSON: {e}")))?;
    let schema = Schema::from_json(&payload).map_err(|e| ApiError::bad_request(e.to_string()))?;
    let name = schema.name.clone();
    let count = schema.count;

    state.store.put_schema(schema)?;
    info!("Stored schema {name} count={count}");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": format!("Schema '{name}' stored") })),
    ))
}

async fn list_schemas(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.list()?))
}

async fn show_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Schema>, ApiError> {
    state
        .store
        .get(&name)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(&name))
}

async fn delete_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(&name)? {
        info!("Deleted schema {name}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(&name))
    }
}

async fn generate_data(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let wants_ndjson = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains(NDJSON));

    // Store reads and generation are blocking work.
    tokio::task::spawn_blocking(move || render_data(&state, &name, wants_ndjson))
        .await
        .map_err(|e| ApiError::internal(format!("Generation task failed: {e}")))?
}

fn render_data(state: &AppState, name: &str, wants_ndjson: bool) -> Result<Response, ApiError> {
    let schema = state
        .store
        .get(name)?
        .ok_or_else(|| ApiError::not_found(name))?;

    let provider = FakeProvider::new().with_age_range(state.ages);
    let mut generator = RecordGenerator::with_provider(provider, rand::random());
    let records = generator.generate_schema(&schema);
    debug!("Generated {} record(s) for {name}", records.len());

    if !wants_ndjson {
        return Ok(Json(records).into_response());
    }

    let mut body = Vec::new();
    write_records(&mut body, &records, OutputFormat::Ndjson)
        .map_err(|e| ApiError::internal(format!("Encoding records failed: {e}")))?;
    Ok(([(header::CONTENT_TYPE, NDJSON)], body).into_response())
}
