// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use vreg_kernel::literal::LiteralError;
use vreg_kernel::RegisterError;
use vreg_persistence::PersistenceError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Register(#[from] RegisterError),
    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("{0}")]
    InvalidInput(String),
    /// Address that does not fit in `u64`, such as a negative literal.
    #[error("address {address} (width {width}) out of allowed range")]
    OutOfRange { address: i128, width: u64 },
    #[error("end {end} must be >= start {start}")]
    InvalidBounds { start: i128, end: i128 },
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::Register(err) => match err {
                RegisterError::OutOfRange { .. } | RegisterError::WriteConflict { .. } => {
                    StatusCode::FORBIDDEN
                }
                _ => StatusCode::BAD_REQUEST,
            },
            EngineError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EngineError::InvalidInput(_) | EngineError::InvalidBounds { .. } => {
                StatusCode::BAD_REQUEST
            }
            EngineError::OutOfRange { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Register(err) => err.kind(),
            EngineError::Persistence(_) => "PersistenceFailure",
            EngineError::InvalidInput(_) => "InvalidInput",
            EngineError::OutOfRange { .. } => "OutOfRange",
            EngineError::InvalidBounds { .. } => "InvalidBounds",
        }
    }
}

impl From<LiteralError> for EngineError {
    fn from(e: LiteralError) -> Self {
        EngineError::InvalidInput(e.to_string())
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", self.kind(), self);
        }

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
