//! HTTP adapters for the tv record operations.
//!
//! Each handler runs `decode → validate → persist → map outcome`, then writes
//! exactly one JSON response and one log event. Nothing is retried.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::common::Envelope;
use crate::domains::tv::{create_tv, delete_tv, read_tv, update_tv, Tv, TvError, ValidationError};
use crate::server::app::AppState;
use crate::server::middleware::ClientIp;

pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Operation name carried in the `method` log field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

/// Everything a handler can fail with, short of a malformed path id.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Body could not be read, e.g. it exceeds the request body limit
    #[error("unable to unmarshal json. field types mismatch?")]
    Body(#[source] BytesRejection),

    #[error("unable to unmarshal json. field types mismatch?")]
    Decode(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Tv(#[from] TvError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Tv(err) if err.is_internal() => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Tv(TvError::NotFound { .. }) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-facing message. Storage details never leave the process.
    pub fn message(&self, operation: Operation) -> String {
        match (self, operation) {
            (ApiError::Tv(err), _) if err.is_internal() => INTERNAL_ERROR_MESSAGE.to_string(),
            (ApiError::Tv(TvError::NotFound { .. }), Operation::Update) => {
                format!("nothing to update: {}", self)
            }
            (ApiError::Tv(TvError::NotFound { .. }), Operation::Delete) => {
                format!("nothing to delete: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

/// Successful handler result
#[derive(Debug)]
pub enum Reply {
    /// Wrapped in a success envelope
    Message(String),
    /// Returned as-is
    Record(Tv),
}

fn requester(client_ip: Option<Extension<ClientIp>>) -> String {
    client_ip.map_or_else(|| "unknown".to_string(), |Extension(ip)| ip.to_string())
}

fn decode_record(body: Result<Bytes, BytesRejection>) -> Result<Tv, ApiError> {
    let body = body.map_err(ApiError::Body)?;
    serde_json::from_slice(&body).map_err(ApiError::Decode)
}

/// Parse the `{id}` path segment; a non-integer id ends the request with 405.
fn parse_id(user: &str, operation: Operation, raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            warn!(
                user,
                method = operation.as_str(),
                status = StatusCode::METHOD_NOT_ALLOWED.as_u16(),
                "invalid record id in path: {:?}",
                raw
            );
            None
        }
    }
}

/// Map a handler result to the HTTP response and emit the request log event.
fn respond(user: &str, operation: Operation, result: Result<Reply, ApiError>) -> Response {
    let method = operation.as_str();

    match result {
        Ok(Reply::Record(tv)) => {
            info!(user, method, status = 200u16, "found record with id:{}", tv.id);
            (StatusCode::OK, Json(tv)).into_response()
        }
        Ok(Reply::Message(message)) => {
            info!(user, method, status = 200u16, "{}", message);
            (StatusCode::OK, Json(Envelope::success(message))).into_response()
        }
        Err(err) => {
            let status = err.status();
            let message = err.message(operation);

            if status.is_server_error() {
                error!(user, method, status = status.as_u16(), error = ?err, "{}", message);
            } else {
                warn!(user, method, status = status.as_u16(), "{}", message);
            }

            (status, Json(Envelope::error(message))).into_response()
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/tv/new
pub async fn create_tv_handler(
    State(state): State<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let user = requester(client_ip);
    let result = create(&state, body).await;
    respond(&user, Operation::Create, result)
}

async fn create(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<Reply, ApiError> {
    let tv = decode_record(body)?;
    tv.validate()?;
    create_tv(state.store.as_ref(), &tv).await?;
    Ok(Reply::Message(format!("created record with id:{}", tv.id)))
}

/// GET /api/tv/{id}
pub async fn read_tv_handler(
    State(state): State<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    Path(raw_id): Path<String>,
) -> Response {
    let user = requester(client_ip);
    let Some(id) = parse_id(&user, Operation::Read, &raw_id) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let result = read_tv(state.store.as_ref(), id)
        .await
        .map(Reply::Record)
        .map_err(ApiError::from);
    respond(&user, Operation::Read, result)
}

/// PUT /api/tv/{id}
pub async fn update_tv_handler(
    State(state): State<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let user = requester(client_ip);
    let Some(id) = parse_id(&user, Operation::Update, &raw_id) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let result = update(&state, id, body).await;
    respond(&user, Operation::Update, result)
}

async fn update(
    state: &AppState,
    id: i64,
    body: Result<Bytes, BytesRejection>,
) -> Result<Reply, ApiError> {
    let tv = decode_record(body)?;
    tv.validate()?;
    update_tv(state.store.as_ref(), id, &tv).await?;
    Ok(Reply::Message(format!("updated record with id:{}", id)))
}

/// DELETE /api/tv/{id}
pub async fn delete_tv_handler(
    State(state): State<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    Path(raw_id): Path<String>,
) -> Response {
    let user = requester(client_ip);
    let Some(id) = parse_id(&user, Operation::Delete, &raw_id) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let result = delete_tv(state.store.as_ref(), id)
        .await
        .map(|()| Reply::Message(format!("deleted record with id:{}", id)))
        .map_err(ApiError::from);
    respond(&user, Operation::Delete, result)
}
