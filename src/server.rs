//! HTTP/JSON server.
//!
//! Thin transport over a [`ContactStore`]: every handler parses its input,
//! makes exactly one store call, and serializes the result.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`    | `/api/contacts?q=` | List or search contacts |
//! | `POST`   | `/api/contacts` | Create a contact (201) |
//! | `GET`    | `/api/contacts/{id}` | Fetch one contact |
//! | `PUT`    | `/api/contacts/{id}` | Partially update a contact |
//! | `DELETE` | `/api/contacts/{id}` | Delete a contact (204) |
//! | `GET`    | `/api/docs/openapi.json` | OpenAPI document |
//! | `GET`    | `/api/docs` | HTML API reference |
//! | `GET`    | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Errors are plain text with the status code carrying the kind:
//! `400` for validation failures and malformed bodies, `404` for unknown
//! ids, `500` once the id counter is exhausted. Ids that do not parse as
//! integers are reported as `404`.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use contact_directory_core::error::MSG_NOT_FOUND;
use contact_directory_core::{
    Contact, ContactPatch, ContactStore, InMemoryContactStore, NewContact, StoreError,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api_docs;
use crate::config::Config;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ContactStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }
}

/// Starts the server with a store seeded from `config`.
///
/// Binds to `[server].bind` and runs until Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = InMemoryContactStore::with_seed(config.seed_contacts()?);
    run_server_with_store(config, Arc::new(store)).await
}

/// Starts the server over an existing store.
///
/// Lets callers (and tests) keep a handle on the store or substitute a
/// different [`ContactStore`] implementation.
pub async fn run_server_with_store(
    config: &Config,
    store: Arc<dyn ContactStore>,
) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr()?;
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "contact directory listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Builds the router with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/contacts",
            get(handle_list_contacts).post(handle_create_contact),
        )
        .route(
            "/api/contacts/{id}",
            get(handle_get_contact)
                .put(handle_update_contact)
                .delete(handle_delete_contact),
        )
        .route("/api/docs/openapi.json", get(handle_openapi))
        .route("/api/docs", get(handle_docs_page))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

// ============ Error response ============

/// Internal error type that converts into a plain-text Axum response.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::IdsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

/// Parses a path id, failing closed: anything that is not an integer is an
/// unknown contact.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        tracing::debug!(id = raw, "unparsable contact id");
        AppError {
            status: StatusCode::NOT_FOUND,
            message: MSG_NOT_FOUND.to_string(),
        }
    })
}

fn log_failure(op: &str, err: &StoreError) {
    match err {
        StoreError::Validation(msg) => tracing::info!(op, reason = %msg, "rejected"),
        StoreError::NotFound(id) => tracing::info!(op, id, "contact not found"),
        StoreError::IdsExhausted => tracing::warn!(op, "contact id counter exhausted"),
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ API docs ============

async fn handle_openapi() -> Json<serde_json::Value> {
    Json(api_docs::openapi_document())
}

async fn handle_docs_page() -> Html<String> {
    Html(api_docs::render_html())
}

// ============ /api/contacts ============

/// Picks the search text out of raw query pairs: the first `q` wins, and
/// a missing `q` means "list everything".
fn search_term(pairs: &[(String, String)]) -> &str {
    pairs
        .iter()
        .find(|(key, _)| key == "q")
        .map_or("", |(_, value)| value.as_str())
}

/// Handler for `GET /api/contacts`.
///
/// Without `q` (or with an empty `q`) returns every contact. The query
/// string never causes a failure: repeated `q` keys use the first value and
/// an undecodable query string is treated as empty.
async fn handle_list_contacts(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Contact>>, AppError> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "ignoring undecodable query string");
            Vec::new()
        }
    };
    let contacts = state.store.search(search_term(&pairs)).await?;
    Ok(Json(contacts))
}

/// Handler for `POST /api/contacts`. Responds `201 Created`.
async fn handle_create_contact(
    State(state): State<AppState>,
    body: Result<Json<NewContact>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), AppError> {
    let Json(new) = body?;
    let contact = state.store.create(new).await.inspect_err(|e| log_failure("create", e))?;
    tracing::info!(id = contact.id, "contact created");
    Ok((StatusCode::CREATED, Json(contact)))
}

/// Handler for `GET /api/contacts/{id}`.
async fn handle_get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, AppError> {
    let id = parse_id(&id)?;
    let contact = state.store.get_by_id(id).await?;
    Ok(Json(contact))
}

/// Handler for `PUT /api/contacts/{id}`.
async fn handle_update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<Contact>, AppError> {
    let id = parse_id(&id)?;
    let Json(patch) = body?;
    let contact = state
        .store
        .update(id, patch)
        .await
        .inspect_err(|e| log_failure("update", e))?;
    tracing::info!(id, "contact updated");
    Ok(Json(contact))
}

/// Handler for `DELETE /api/contacts/{id}`. Responds `204 No Content`.
async fn handle_delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state
        .store
        .delete_by_id(id)
        .await
        .inspect_err(|e| log_failure("delete", e))?;
    tracing::info!(id, "contact deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        let err = parse_id("abc").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Contact not found.");
        assert!(parse_id("1.5").is_err());
    }

    #[test]
    fn test_search_term_first_q_wins() {
        let pairs = vec![
            ("sort".to_string(), "name".to_string()),
            ("q".to_string(), "alan".to_string()),
            ("q".to_string(), "x".to_string()),
        ];
        assert_eq!(search_term(&pairs), "alan");
        assert_eq!(search_term(&[]), "");
    }

    #[test]
    fn test_store_error_mapping() {
        let e = AppError::from(StoreError::create_required());
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
        assert_eq!(e.message, "First Name and Email are required.");

        let e = AppError::from(StoreError::NotFound(3));
        assert_eq!(e.status, StatusCode::NOT_FOUND);
        assert_eq!(e.message, "Contact not found.");

        let e = AppError::from(StoreError::IdsExhausted);
        assert_eq!(e.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
