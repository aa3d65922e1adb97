//! Integration tests for reservation API DTOs
//!
//! These tests exercise the request/response types the handlers are built
//! on. For full integration testing, set DATABASE_URL environment variable.

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tabling_api::dto::reservation::{CheckInRequest, ReservationResponse};
    use tabling_api::dto::store::StoreResponse;
    use tabling_api::dto::user::UserResponse;
    use tabling_api::dto::PaginationParams;
    use tabling_core::models::{ApproveStatus, Reservation, Store, User};
    use validator::Validate;

    #[test]
    fn test_pagination_offset_calculation() {
        let params = PaginationParams {
            page: 1,
            per_page: 10,
        };
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            page: 3,
            per_page: 20,
        };
        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_reservation_response_conversion() {
        let mut reservation = Reservation::new(
            3,
            7,
            "010-1234-5678".to_string(),
            Utc::now(),
            "0913".to_string(),
        );
        reservation.id = 12345;
        reservation.approve_status = ApproveStatus::Approved;
        reservation.visited = true;

        let response = ReservationResponse::from(reservation);

        assert_eq!(response.id, 12345);
        assert_eq!(response.store_id, 3);
        assert_eq!(response.customer_id, 7);
        assert_eq!(response.approve_status, "approved");
        assert!(response.visited);
        assert!(!response.reviewed);
    }

    #[test]
    fn test_check_in_request_validation() {
        let req = CheckInRequest {
            reservation_id: 1,
            contact_number: "010-1234-5678".to_string(),
            code: "0913".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = CheckInRequest {
            reservation_id: 1,
            contact_number: "010-1234-5678".to_string(),
            code: String::new(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_store_response_conversion() {
        let mut store = Store::new(
            2,
            "Corner Cafe".to_string(),
            "Espresso and pastries".to_string(),
            37.56,
            126.97,
        );
        store.id = 54321;
        store.star = 4.5;

        let response = StoreResponse::from(store);

        assert_eq!(response.id, 54321);
        assert_eq!(response.owner_id, 2);
        assert_eq!(response.name, "Corner Cafe");
        assert_eq!(response.star, 4.5);
        assert!(response.is_available);
    }

    #[test]
    fn test_user_response_hides_role_enum() {
        let user = User::new(
            "alice@example.com".to_string(),
            "alice".to_string(),
            Some("010-1111-2222".to_string()),
        );

        let response = UserResponse::from(user);

        assert_eq!(response.role, "customer");
        assert_eq!(response.username, "alice");
    }
}
