//! # REST API
//!
//! The wire contract, served by axum under the `/api` base path and
//! exchanging the camelCase Note shape:
//!
//! | route | operation |
//! |-------|-----------|
//! | `GET /api/notes` | active notes, pinned first then newest |
//! | `GET /api/notes/trash` | trashed notes, newest first |
//! | `GET /api/notes/archive` | archived notes, newest first |
//! | `GET /api/notes/all` | the raw collection (remote-store read) |
//! | `POST /api/notes` | create, 201 |
//! | `PUT /api/notes/:id` | partial merge update |
//! | `DELETE /api/notes/:id` | soft-delete; `?permanent=true` purges |
//! | `PUT /api/notes/:id/restore` | take out of the trash |
//! | `PUT /api/notes/:id/archive` | toggle the archived flag |
//!
//! Errors map onto the taxonomy: unknown ids are 404, malformed payloads
//! (bad JSON, unknown color tokens) are 400, store failures are 500, all
//! with an `{"error": ...}` body. CORS is wide open and requests are
//! traced; there is no authentication.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use notekeepapp::error::NoteError;
use notekeepapp::model::{NewNote, Note, NotePatch};
use notekeepapp::service::NoteService;
use notekeepapp::store::NoteStore;

pub struct AppState<S: NoteStore> {
    service: Arc<NoteService<S>>,
}

// Manual Clone: `S` itself need not be Clone, only the Arc is.
impl<S: NoteStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

pub struct ApiError(NoteError);

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            NoteError::NotFound(_) => StatusCode::NOT_FOUND,
            NoteError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub fn router<S: NoteStore + 'static>(service: Arc<NoteService<S>>) -> Router {
    let api = Router::new()
        .route("/notes", get(list_active::<S>).post(create::<S>))
        .route("/notes/all", get(list_all::<S>))
        .route("/notes/trash", get(list_trashed::<S>))
        .route("/notes/archive", get(list_archived::<S>))
        .route("/notes/:id", put(update::<S>).delete(remove::<S>))
        .route("/notes/:id/restore", put(restore::<S>))
        .route("/notes/:id/archive", put(toggle_archive::<S>))
        .with_state(AppState { service });

    Router::new()
        .route("/", get(root))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve<S: NoteStore + 'static>(
    addr: &str,
    service: Arc<NoteService<S>>,
) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notekeep=info,tower_http=info".into()),
        )
        .init();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("notekeep API listening on {}", addr);
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn root() -> &'static str {
    "notekeep API is running"
}

async fn list_active<S: NoteStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.service.list_active().await?))
}

async fn list_trashed<S: NoteStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.service.list_trashed().await?))
}

async fn list_archived<S: NoteStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.service.list_archived().await?))
}

async fn list_all<S: NoteStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Note>>, ApiError> {
    Ok(Json(state.service.list_all().await?))
}

async fn create<S: NoteStore>(
    State(state): State<AppState<S>>,
    Json(body): Json<serde_json::Value>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let new: NewNote = decode(body)?;
    let note = state.service.create(new).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update<S: NoteStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Note>, ApiError> {
    let patch: NotePatch = decode(body)?;
    Ok(Json(state.service.update(id, patch).await?))
}

#[derive(Deserialize)]
struct RemoveParams {
    #[serde(default)]
    permanent: bool,
}

/// DELETE moves a note to the trash; with `?permanent=true` it purges the
/// record instead, answering with a confirmation message.
async fn remove<S: NoteStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
    Query(params): Query<RemoveParams>,
) -> Result<Response, ApiError> {
    if params.permanent {
        state.service.permanent_delete(id).await?;
        Ok(Json(json!({ "message": "Note permanently deleted" })).into_response())
    } else {
        Ok(Json(state.service.soft_delete(id).await?).into_response())
    }
}

async fn restore<S: NoteStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.service.restore(id).await?))
}

async fn toggle_archive<S: NoteStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    Ok(Json(state.service.toggle_archive(id).await?))
}

/// Decode a payload strictly, turning serde failures into 400s rather than
/// the framework's default rejection.
fn decode<T: serde::de::DeserializeOwned>(body: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError(NoteError::Validation(e.to_string())))
}
