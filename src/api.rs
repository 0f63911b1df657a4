//! HTTP surface for the student roster.
//!
//! This module exposes a compact Axum router over any [`RosterApi`] implementation:
//!
//! - `POST /students` – Create a record from `{ name, age, email }`; returns it with its new `id`.
//! - `GET /students` – List every live record.
//! - `GET|PUT|DELETE /students/{id}` – Read, replace, or remove a single record.
//! - `GET /students/profile/{id}` – Return `{ "profile": ... }`, computing and caching it on first use.
//! - `GET /metrics` – Observe store activity counters.
//! - `GET /commands` – Machine-readable command catalog for quick discovery by tools.
//!
//! An empty id segment or extra segments after the id answer `400` like any other malformed id.
//! Unsupported methods on these paths answer `405 Method Not Allowed`.

use crate::metrics::MetricsSnapshot;
use crate::roster::{RosterApi, RosterError, Student, StudentDraft, StudentId};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Build the HTTP router exposing the roster API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: RosterApi + 'static,
{
    Router::new()
        .route(
            "/students",
            get(list_students::<S>).post(create_student::<S>),
        )
        .route(
            "/students/:id",
            get(get_student::<S>)
                .put(replace_student::<S>)
                .delete(delete_student::<S>),
        )
        .route(
            "/students/",
            get(reject_unparsable_id)
                .put(reject_unparsable_id)
                .delete(reject_unparsable_id),
        )
        .route(
            "/students/:id/*rest",
            get(reject_unparsable_id)
                .put(reject_unparsable_id)
                .delete(reject_unparsable_id),
        )
        .route("/students/profile/:id", get(get_profile::<S>))
        .route("/students/profile/", get(reject_unparsable_id))
        .route("/students/profile/:id/*rest", get(reject_unparsable_id))
        .route("/metrics", get(get_metrics::<S>))
        .route("/commands", get(get_commands))
        .with_state(service)
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The `{id}` path segment is not an integer.
    #[error("Invalid student ID format")]
    InvalidId(String),
    /// No record exists for the requested id.
    #[error("Student not found")]
    NotFound(StudentId),
    /// The request body is not a JSON object with correctly typed fields.
    #[error("Invalid request body: {0}")]
    MalformedBody(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

impl From<RosterError> for ApiError {
    fn from(inner: RosterError) -> Self {
        match inner {
            RosterError::NotFound { id } => {
                tracing::debug!(id, "Student lookup missed");
                Self::NotFound(id)
            }
        }
    }
}

/// Parse the `{id}` path segment without touching the store.
fn parse_student_id(raw: &str) -> Result<StudentId, ApiError> {
    raw.parse().map_err(|_| {
        tracing::debug!(segment = raw, "Rejected malformed student id");
        ApiError::InvalidId(raw.to_string())
    })
}

/// Answer paths whose id segment is empty or followed by further segments.
///
/// Everything after the collection prefix is treated as the id, so these always fail to parse.
async fn reject_unparsable_id(uri: Uri) -> ApiError {
    let path = uri.path();
    let segment = path
        .strip_prefix("/students/profile/")
        .or_else(|| path.strip_prefix("/students/"))
        .unwrap_or(path);
    match parse_student_id(segment) {
        Err(err) => err,
        Ok(_) => ApiError::InvalidId(segment.to_string()),
    }
}

/// Decode a draft record from a request body.
///
/// The `Content-Type` header is not inspected. Syntax errors, mistyped fields, non-object
/// payloads, and empty bodies are all rejected; absent fields take their zero values.
fn parse_draft(body: &[u8]) -> Result<StudentDraft, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::warn!(error = %err, "Rejected malformed student payload");
        ApiError::MalformedBody(err.to_string())
    })
}

/// Create a record under the next identifier.
async fn create_student<S>(
    State(service): State<Arc<S>>,
    body: Bytes,
) -> Result<Json<Student>, ApiError>
where
    S: RosterApi,
{
    let draft = parse_draft(&body)?;
    let student = service.create(draft);
    tracing::info!(id = student.id, "Student created");
    Ok(Json(student))
}

/// List every live record. Order is not part of the contract.
async fn list_students<S>(State(service): State<Arc<S>>) -> Json<Vec<Student>>
where
    S: RosterApi,
{
    Json(service.list())
}

async fn get_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Student>, ApiError>
where
    S: RosterApi,
{
    let id = parse_student_id(&raw_id)?;
    Ok(Json(service.get(id)?))
}

/// Replace every caller-supplied field of a record. The stored id always wins over any `id`
/// in the body, and a cached profile is discarded.
async fn replace_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Student>, ApiError>
where
    S: RosterApi,
{
    let id = parse_student_id(&raw_id)?;
    let draft = parse_draft(&body)?;
    let student = service.replace(id, draft)?;
    tracing::info!(id, "Student replaced");
    Ok(Json(student))
}

async fn delete_student<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    S: RosterApi,
{
    let id = parse_student_id(&raw_id)?;
    service.delete(id)?;
    tracing::info!(id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Response body for `GET /students/profile/{id}`.
#[derive(Serialize)]
struct ProfileResponse {
    profile: String,
}

async fn get_profile<S>(
    State(service): State<Arc<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError>
where
    S: RosterApi,
{
    let id = parse_student_id(&raw_id)?;
    let profile = service.profile(id)?;
    Ok(Json(ProfileResponse { profile }))
}

/// Return a snapshot of store activity counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: RosterApi,
{
    Json(service.metrics_snapshot())
}

/// Descriptor for a single command in the discovery catalog.
#[derive(Serialize)]
struct CommandDescriptor {
    name: &'static str,
    method: &'static str,
    path: &'static str,
    description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_example: Option<serde_json::Value>,
}

/// Response body for `GET /commands`.
#[derive(Serialize)]
struct CommandsResponse {
    commands: Vec<CommandDescriptor>,
}

/// Enumerate supported HTTP commands for discovery in hosts and tools.
async fn get_commands() -> Json<CommandsResponse> {
    let student_example = json!({
        "name": "Ada",
        "age": 30,
        "email": "ada@example.com"
    });
    Json(CommandsResponse {
        commands: vec![
            CommandDescriptor {
                name: "create_student",
                method: "POST",
                path: "/students",
                description: "Store a new student and return it with its assigned id.",
                request_example: Some(student_example.clone()),
            },
            CommandDescriptor {
                name: "list_students",
                method: "GET",
                path: "/students",
                description: "Return every stored student. Order is unspecified.",
                request_example: None,
            },
            CommandDescriptor {
                name: "get_student",
                method: "GET",
                path: "/students/{id}",
                description: "Return a single student by id.",
                request_example: None,
            },
            CommandDescriptor {
                name: "replace_student",
                method: "PUT",
                path: "/students/{id}",
                description: "Overwrite a student's fields. The id is preserved and the cached profile is cleared.",
                request_example: Some(student_example),
            },
            CommandDescriptor {
                name: "delete_student",
                method: "DELETE",
                path: "/students/{id}",
                description: "Remove a student. Responds 204 with an empty body.",
                request_example: None,
            },
            CommandDescriptor {
                name: "student_profile",
                method: "GET",
                path: "/students/profile/{id}",
                description: "Return { \"profile\": string }, computing and caching the summary on first request.",
                request_example: None,
            },
            CommandDescriptor {
                name: "metrics",
                method: "GET",
                path: "/metrics",
                description: "Return store activity counters.",
                request_example: None,
            },
        ],
    })
}
