//! DomainError to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Wrapper making [`DomainError`] an axum response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::UNPROCESSABLE_ENTITY,

        ErrorCode::PatientNotFound
        | ErrorCode::DentistNotFound
        | ErrorCode::ProcedureNotFound
        | ErrorCode::AppointmentNotFound
        | ErrorCode::SubscriptionNotFound
        | ErrorCode::PaymentNotFound
        | ErrorCode::EntryNotFound => StatusCode::NOT_FOUND,

        ErrorCode::InvalidStateTransition | ErrorCode::Conflict => StatusCode::CONFLICT,

        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden | ErrorCode::SubscriptionExpired | ErrorCode::SubscriptionMissing => {
            StatusCode::FORBIDDEN
        }

        ErrorCode::ExternalServiceError => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);

        // Infrastructure details stay in the logs, not in responses.
        let message = if status.is_server_error() || status == StatusCode::BAD_GATEWAY {
            tracing::error!(code = %self.0.code, error = %self.0, "request failed");
            match self.0.code {
                ErrorCode::ExternalServiceError => {
                    "Payment provider unavailable, try again".to_string()
                }
                _ => "Internal server error".to_string(),
            }
        } else {
            self.0.message.clone()
        };

        let body = Json(serde_json::json!({
            "error": message,
            "code": self.0.code.to_string(),
        }));
        (status, body).into_response()
    }
}
