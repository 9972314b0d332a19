// Route exports
pub mod catalog;
pub mod users;

use actix_web::{error, http::StatusCode, web, HttpResponse};

use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{PasswordError, PasswordHasher, StoreError, UserStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub store: UserStore,
    pub hasher: PasswordHasher,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(catalog::configure)
        .configure(users::configure);
}

impl error::ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl From<StoreError> for ErrorResponse {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(mobile) => ErrorResponse::new(
                "User already registered",
                format!("Mobile number {} is already registered", mobile),
                409,
            ),
            StoreError::NotFound(mobile) => {
                ErrorResponse::not_found("User not found", format!("No user with mobile number {}", mobile))
            }
            other => {
                tracing::error!("Store error: {}", other);
                ErrorResponse::internal("Internal server error", other.to_string())
            }
        }
    }
}

impl From<PasswordError> for ErrorResponse {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password error: {}", err);
        ErrorResponse::internal("Internal server error", err.to_string())
    }
}

impl From<error::BlockingError> for ErrorResponse {
    fn from(err: error::BlockingError) -> Self {
        tracing::error!("Blocking task failed: {}", err);
        ErrorResponse::internal("Internal server error", err.to_string())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}
