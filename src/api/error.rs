use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use tracing::{error, warn};

use crate::api::validation::ErrorResponse;

/// Service-level errors shared by the job and worker endpoints.
#[derive(Debug)]
pub enum ServiceError {
    /// Database operation failed
    Database(sqlx::Error),

    /// Caller-supplied data failed validation
    Validation(String),

    /// Requested record does not exist
    NotFound(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Database(e) => write!(f, "Database error: {}", e),
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl ServiceError {
    /// Prefix a validation failure with an element's position in a bulk
    /// request. Other variants pass through untouched.
    pub fn at_index(self, entity: &str, index: usize) -> Self {
        match self {
            ServiceError::Validation(msg) => {
                ServiceError::Validation(format!("{} at index {}: {}", entity, index, msg))
            }
            other => other,
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Database(e)
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Database(e) => {
                error!("Database error: {}", e);
                // Never echo driver errors to the client
                HttpResponse::InternalServerError().json(ErrorResponse {
                    detail: "Database error occurred".to_string(),
                })
            }
            ServiceError::Validation(msg) => {
                warn!("Validation error: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse {
                    detail: msg.clone(),
                })
            }
            ServiceError::NotFound(msg) => {
                warn!("Not found: {}", msg);
                HttpResponse::NotFound().json(ErrorResponse {
                    detail: msg.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn validation_maps_to_400() {
        let resp = ServiceError::Validation("Name field required".into()).error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = ServiceError::NotFound("Job not found".into()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_maps_to_500() {
        let resp = ServiceError::Database(sqlx::Error::PoolClosed).error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
