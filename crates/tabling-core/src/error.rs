//! Unified error handling for Tabling
//!
//! This module provides a comprehensive error type that covers all possible
//! failure scenarios in the application, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
/// Every variant is a distinct, non-retryable outcome; the caller decides
/// what to show.
#[derive(Error, Debug)]
pub enum AppError {
    // ==================== Database Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    // ==================== Not Found ====================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Store not found: {0}")]
    StoreNotFound(String),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Review not found: {0}")]
    ReviewNotFound(String),

    #[error("Kiosk not found: {0}")]
    KioskNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    // ==================== Authorization ====================
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Caller does not own this resource")]
    OwnerMismatch,

    #[error("User is not enrolled as a partner")]
    PartnerNotEnrolled,

    // ==================== Lifecycle State ====================
    #[error("Store is not accepting reservations")]
    StoreUnavailable,

    #[error("Reservation is not approved")]
    ReservationNotApproved,

    #[error("Reservation has not been visited")]
    ReservationNotVisited,

    #[error("Reservation has already been decided")]
    ReservationAlreadyDecided,

    // ==================== Conflicts ====================
    #[error("Reservation has already been checked in")]
    AlreadyVisited,

    #[error("Reservation has already been reviewed")]
    AlreadyReviewed,

    #[error("User is already enrolled as a partner")]
    PartnerAlreadyEnrolled,

    #[error("Conflict: {0}")]
    Conflict(String),

    // ==================== Check-In Credential Mismatch ====================
    #[error("Contact number does not match the reservation")]
    ContactMismatch,

    #[error("Visit authorization code does not match")]
    CodeMismatch,

    #[error("Kiosk is not bound to the reservation's store")]
    KioskStoreMismatch,

    // ==================== Visit Window ====================
    #[error("Reservation visit window has elapsed")]
    ReservationExpired,

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_)
            | AppError::InvalidInput(_)
            | AppError::ContactMismatch
            | AppError::CodeMismatch
            | AppError::KioskStoreMismatch => StatusCode::BAD_REQUEST,

            // 403 Forbidden
            AppError::Unauthorized(_)
            | AppError::OwnerMismatch
            | AppError::PartnerNotEnrolled => StatusCode::FORBIDDEN,

            // 404 Not Found
            AppError::UserNotFound(_)
            | AppError::StoreNotFound(_)
            | AppError::ReservationNotFound(_)
            | AppError::ReviewNotFound(_)
            | AppError::KioskNotFound(_)
            | AppError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::StoreUnavailable
            | AppError::ReservationNotApproved
            | AppError::ReservationNotVisited
            | AppError::ReservationAlreadyDecided
            | AppError::AlreadyVisited
            | AppError::AlreadyReviewed
            | AppError::PartnerAlreadyEnrolled
            | AppError::Conflict(_) => StatusCode::CONFLICT,

            // 410 Gone
            AppError::ReservationExpired => StatusCode::GONE,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::Transaction(_) => "transaction_error",
            AppError::UserNotFound(_) => "user_not_found",
            AppError::StoreNotFound(_) => "store_not_found",
            AppError::ReservationNotFound(_) => "reservation_not_found",
            AppError::ReviewNotFound(_) => "review_not_found",
            AppError::KioskNotFound(_) => "kiosk_not_found",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::OwnerMismatch => "owner_mismatch",
            AppError::PartnerNotEnrolled => "partner_not_enrolled",
            AppError::StoreUnavailable => "store_unavailable",
            AppError::ReservationNotApproved => "reservation_not_approved",
            AppError::ReservationNotVisited => "reservation_not_visited",
            AppError::ReservationAlreadyDecided => "reservation_already_decided",
            AppError::AlreadyVisited => "already_visited",
            AppError::AlreadyReviewed => "already_reviewed",
            AppError::PartnerAlreadyEnrolled => "partner_already_enrolled",
            AppError::Conflict(_) => "conflict",
            AppError::ContactMismatch => "contact_mismatch",
            AppError::CodeMismatch => "code_mismatch",
            AppError::KioskStoreMismatch => "kiosk_store_mismatch",
            AppError::ReservationExpired => "reservation_expired",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ReservationNotFound("7".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::OwnerMismatch.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::AlreadyVisited.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::CodeMismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::ReservationExpired.status_code(), StatusCode::GONE);
    }

    #[test]
    fn test_error_codes_are_distinct_per_check() {
        // the kiosk UI relies on distinct codes for each validation step
        let codes = [
            AppError::KioskNotFound("1".to_string()).error_code(),
            AppError::ReservationNotFound("1".to_string()).error_code(),
            AppError::KioskStoreMismatch.error_code(),
            AppError::ContactMismatch.error_code(),
            AppError::CodeMismatch.error_code(),
            AppError::ReservationNotApproved.error_code(),
            AppError::ReservationExpired.error_code(),
            AppError::AlreadyVisited.error_code(),
        ];
        let mut unique = codes.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }
}
