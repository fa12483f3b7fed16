//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error HTTP-agnostic while giving every handler the same
//! JSON envelope and status mapping. Storage and internal failures are
//! redacted: clients see a generic message and the trace id, logs keep the
//! cause.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, Rule};
use crate::middleware::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthenticated | ErrorCode::InvalidSession => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_server_side(error: &Error) -> Error {
    let redacted = match error.code() {
        ErrorCode::StorageUnavailable => {
            Error::storage_unavailable("storage unavailable, try again later")
        }
        ErrorCode::InternalError => Error::internal("Internal server error"),
        _ => return error.clone(),
    };
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = ?self.code(), trace_id = ?self.trace_id(), cause = %self, "request failed");
        }
        let mut builder = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_server_side(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Turn malformed JSON bodies into `validation_failed` on `body`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let rule = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            Rule::TooLong
        }
        _ => Rule::Empty,
    };
    Error::validation_failed("body", rule.as_str(), format!("invalid request body: {err}")).into()
}

/// Turn malformed query strings into `validation_failed` on `query`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::validation_failed(
        "query",
        Rule::NotANumber.as_str(),
        format!("invalid query string: {err}"),
    )
    .into()
}

/// Turn undecodable path segments into `validation_failed` on `path`.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::validation_failed(
        "path",
        Rule::NotANumber.as_str(),
        format!("invalid path: {err}"),
    )
    .into()
}
