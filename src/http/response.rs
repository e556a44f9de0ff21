//! Gateway error taxonomy and its HTTP mapping.
//!
//! # Responsibilities
//! - Classify failures from decoding, the remote call, and stream draining
//! - Map each class to exactly one HTTP status
//! - Render failures as plain-text bodies, never partial JSON
//!
//! # Design Decisions
//! - Remote status codes are classified here and nowhere else, per procedure
//! - Deadline expiry is a server error (500), not a gateway timeout

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;
use tonic::{Code, Status};

use crate::observability::metrics;

/// Errors that can end a gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The route does not accept this HTTP method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The request body or query could not be decoded.
    #[error("{0}")]
    Decode(String),

    /// The service rejected the input.
    #[error("{0}")]
    Validation(String),

    /// The requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The remote call failed.
    #[error("upstream call failed: {0}")]
    Transport(String),

    /// The remote call did not finish within its deadline.
    #[error("upstream call exceeded deadline of {}ms", .0.as_millis())]
    DeadlineExceeded(Duration),

    /// The result stream failed before normal completion.
    #[error("stream aborted: {0}")]
    Stream(String),
}

impl GatewayError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Decode(_) | GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Transport(_)
            | GatewayError::DeadlineExceeded(_)
            | GatewayError::Stream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label used in metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MethodNotAllowed => "method",
            GatewayError::Decode(_) => "decode",
            GatewayError::Validation(_) => "validation",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::Transport(_) => "transport",
            GatewayError::DeadlineExceeded(_) => "deadline",
            GatewayError::Stream(_) => "stream",
        }
    }
}

/// Remote procedure a failed call was made to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    CreateUser,
    GetUser,
    ListUsers,
}

impl GatewayError {
    /// Classify a remote failure.
    ///
    /// Only create may fail validation and only get may miss; any other
    /// status, on any procedure, is a transport failure.
    pub fn from_status(procedure: Procedure, status: Status) -> Self {
        match (procedure, status.code()) {
            (Procedure::CreateUser, Code::InvalidArgument) => {
                GatewayError::Validation(status.message().to_string())
            }
            (Procedure::GetUser, Code::NotFound) => {
                GatewayError::NotFound(status.message().to_string())
            }
            (_, code) => GatewayError::Transport(format!("{:?}: {}", code, status.message())),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        metrics::record_error(self.kind());
        (self.status_code(), self.to_string()).into_response()
    }
}
