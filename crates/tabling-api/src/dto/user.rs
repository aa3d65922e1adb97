//! User and partner enrollment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabling_core::models::User;
use validator::Validate;

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreateRequest {
    /// Email address
    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    /// Display name
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,

    /// Phone number
    pub phone: Option<String>,
}

/// Partner enrollment request
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerEnrollRequest {
    /// Customer to enroll
    pub user_id: i64,
}

/// User response
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    /// User ID
    pub id: i64,

    /// Email address
    pub email: String,

    /// Display name
    pub username: String,

    /// Phone number
    pub phone: Option<String>,

    /// Role: "customer" or "partner"
    pub role: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            phone: u.phone,
            role: u.role.to_string(),
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_create_validation() {
        let req = UserCreateRequest {
            email: "not-an-email".to_string(),
            username: "alice".to_string(),
            phone: None,
        };
        assert!(req.validate().is_err());

        let req = UserCreateRequest {
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            phone: None,
        };
        assert!(req.validate().is_ok());
    }
}
