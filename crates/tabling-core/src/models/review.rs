//! Review model
//!
//! At most one review per reservation, written only after the visit.
//! The store id is denormalized onto the review for aggregate queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimum star rating
pub const MIN_STAR: i32 = 0;

/// Maximum star rating
pub const MAX_STAR: i32 = 5;

/// Review entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier
    pub id: i64,

    /// Reviewed reservation (unique per review)
    pub reservation_id: i64,

    /// Authoring customer
    pub customer_id: i64,

    /// Reviewed store
    pub store_id: i64,

    /// Star rating (0..=5)
    pub star: i32,

    /// Free-text content
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Create a new review for a visited reservation
    pub fn new(
        reservation_id: i64,
        customer_id: i64,
        store_id: i64,
        star: i32,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            reservation_id,
            customer_id,
            store_id,
            star,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check that a star value is within the valid rating range
    pub fn is_valid_star(star: i32) -> bool {
        (MIN_STAR..=MAX_STAR).contains(&star)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_bounds() {
        assert!(Review::is_valid_star(0));
        assert!(Review::is_valid_star(5));
        assert!(!Review::is_valid_star(-1));
        assert!(!Review::is_valid_star(6));
    }

    #[test]
    fn test_new_review() {
        let r = Review::new(1, 2, 3, 4, "good".to_string());
        assert_eq!(r.reservation_id, 1);
        assert_eq!(r.star, 4);
    }
}
