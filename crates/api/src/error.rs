//! API Error Responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cost_projector::{EstimationResult, ProjectionError};
use data_validator::ValidationError;
use identity::AuthError;
use inference_engine::InferenceError;
use serde::Serialize;
use serde_json::json;
use storage::StorageError;
use thiserror::Error;
use tracing::{error, warn};

use crate::workflow::WorkflowError;

/// Every failure a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ModelUnavailable(String),

    #[error("{0}")]
    DivisionByZero(String),

    #[error("Trip estimate could not be recorded: {reason}")]
    NotRecorded {
        estimate: EstimationResult,
        reason: String,
    },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::DivisionByZero(_) | ApiError::NotRecorded { .. } | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Validation(_) | ApiError::BadRequest(_) => "invalid_request",
            ApiError::NotFound(_) => "not_found",
            ApiError::ModelUnavailable(_) => "model_unavailable",
            ApiError::DivisionByZero(_) => "degenerate_consumption_rate",
            ApiError::NotRecorded { .. } => "persistence_failed",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

/// Estimate echoed back when it could not be recorded
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UnrecordedEstimate {
    consumption_rate: f64,
    fuel_needed: f64,
    fuel_cost: f64,
    toll_cost: f64,
    total_cost: f64,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let body = match &self {
            ApiError::NotRecorded { estimate, .. } => {
                error!("{}", message);
                json!({
                    "message": message,
                    "error": self.code(),
                    "recorded": false,
                    "data": UnrecordedEstimate {
                        consumption_rate: estimate.consumption_rate,
                        fuel_needed: estimate.total_fuel,
                        fuel_cost: estimate.fuel_cost,
                        toll_cost: estimate.toll_cost,
                        total_cost: estimate.total_cost(),
                    },
                })
            }
            _ => {
                if status.is_server_error() {
                    error!("{} ({})", message, self.code());
                } else {
                    warn!("Request rejected ({}): {}", status.as_u16(), message);
                }
                json!({ "message": message, "error": self.code() })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}

impl From<WorkflowError> for ApiError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::NotFound(e) => ApiError::NotFound(e.to_string()),
            WorkflowError::Storage(e) => ApiError::Internal(e.to_string()),
            WorkflowError::Inference(InferenceError::ModelUnavailable(reason)) => {
                ApiError::ModelUnavailable(format!("Consumption model unavailable: {}", reason))
            }
            WorkflowError::Inference(e) => ApiError::Internal(e.to_string()),
            WorkflowError::Projection(e @ ProjectionError::DivisionByZero(_)) => {
                ApiError::DivisionByZero(e.to_string())
            }
            WorkflowError::Projection(e @ ProjectionError::InvalidInput { .. }) => {
                ApiError::BadRequest(e.to_string())
            }
            WorkflowError::Persistence { estimate, source } => ApiError::NotRecorded {
                estimate,
                reason: source.to_string(),
            },
        }
    }
}
