//! Review DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabling_core::models::Review;
use validator::Validate;

/// Review creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewCreateRequest {
    /// Authoring customer
    pub customer_id: i64,

    /// Visited reservation being reviewed
    pub reservation_id: i64,

    /// Star rating
    #[validate(range(min = 0, max = 5, message = "Star rating must be between 0 and 5"))]
    pub star: i32,

    /// Free-text content
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub content: String,
}

/// Review update request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewUpdateRequest {
    /// Acting customer, must be the author
    pub customer_id: i64,

    /// New star rating
    #[validate(range(min = 0, max = 5, message = "Star rating must be between 0 and 5"))]
    pub star: i32,

    /// New content
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub content: String,
}

/// Query parameters identifying the acting customer
#[derive(Debug, Clone, Deserialize)]
pub struct ActorParams {
    /// Acting customer
    pub customer_id: i64,
}

/// Review response
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    /// Review ID
    pub id: i64,

    /// Reviewed reservation
    pub reservation_id: i64,

    /// Authoring customer
    pub customer_id: i64,

    /// Reviewed store
    pub store_id: i64,

    /// Star rating
    pub star: i32,

    /// Free-text content
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            reservation_id: r.reservation_id,
            customer_id: r.customer_id,
            store_id: r.store_id,
            star: r.star,
            content: r.content,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_range_validation() {
        let mut req = ReviewCreateRequest {
            customer_id: 1,
            reservation_id: 1,
            star: 6,
            content: String::new(),
        };
        assert!(req.validate().is_err());

        req.star = 5;
        assert!(req.validate().is_ok());

        req.star = -1;
        assert!(req.validate().is_err());
    }
}
