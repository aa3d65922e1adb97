//! Reservation and check-in DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tabling_core::models::Reservation;
use validator::Validate;

/// Booking request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReservationCreateRequest {
    /// Booking customer
    pub customer_id: i64,

    /// Store to visit
    pub store_id: i64,

    /// Contact number presented again at check-in
    #[validate(length(min = 1, max = 30, message = "Contact number is required"))]
    pub contact_number: String,

    /// Requested visit time
    pub reserved_at: DateTime<Utc>,
}

/// Confirm or decline request, submitted by the store's partner
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionRequest {
    /// Acting partner
    pub partner_id: i64,
}

/// Query parameters for the partner timetable
#[derive(Debug, Clone, Deserialize)]
pub struct TimetableParams {
    /// Acting partner
    pub partner_id: i64,

    /// Day to list (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Kiosk check-in request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckInRequest {
    /// Reservation being claimed
    pub reservation_id: i64,

    /// Contact number as presented at booking
    #[validate(length(min = 1, max = 30, message = "Contact number is required"))]
    pub contact_number: String,

    /// Visit authorization code issued at booking
    #[validate(length(min = 1, max = 10, message = "Visit code is required"))]
    pub code: String,
}

/// Reservation response
#[derive(Debug, Clone, Serialize)]
pub struct ReservationResponse {
    /// Reservation ID
    pub id: i64,

    /// Store being visited
    pub store_id: i64,

    /// Booking customer
    pub customer_id: i64,

    /// Contact number
    pub contact_number: String,

    /// Visit authorization code
    pub code: String,

    /// Reserved visit time
    pub reserved_at: DateTime<Utc>,

    /// Approval status
    pub approve_status: String,

    /// Whether the customer has checked in
    pub visited: bool,

    /// Whether the visit has been reviewed
    pub reviewed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            store_id: r.store_id,
            customer_id: r.customer_id,
            contact_number: r.contact_number,
            code: r.code,
            reserved_at: r.reserved_at,
            approve_status: r.approve_status.to_string(),
            visited: r.visited,
            reviewed: r.reviewed,
            created_at: r.created_at,
        }
    }
}

/// Check-in response shown on the kiosk
#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    /// Name to greet the customer with
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_response_from_model() {
        let r = Reservation::new(
            3,
            7,
            "010-1234-5678".to_string(),
            Utc::now(),
            "0042".to_string(),
        );
        let resp = ReservationResponse::from(r);
        assert_eq!(resp.store_id, 3);
        assert_eq!(resp.customer_id, 7);
        assert_eq!(resp.approve_status, "requested");
        assert!(!resp.visited);
    }

    #[test]
    fn test_check_in_request_validation() {
        let req = CheckInRequest {
            reservation_id: 1,
            contact_number: String::new(),
            code: "4821".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
