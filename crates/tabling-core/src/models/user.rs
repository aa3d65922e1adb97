//! User model
//!
//! Users start as customers and can enroll as partners (store owners).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User role enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Standard customer who books reservations
    #[default]
    Customer,
    /// Store owner who manages stores and decides on reservations
    Partner,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Customer => write!(f, "customer"),
            UserRole::Partner => write!(f, "partner"),
        }
    }
}

impl UserRole {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "customer" => Some(UserRole::Customer),
            "partner" => Some(UserRole::Partner),
            _ => None,
        }
    }

    /// Check if the role may own stores
    pub fn is_partner(&self) -> bool {
        matches!(self, UserRole::Partner)
    }
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,

    /// Email address (unique)
    pub email: String,

    /// Display name shown on the kiosk at check-in
    pub username: String,

    /// Contact phone number
    pub phone: Option<String>,

    /// User role
    pub role: UserRole,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new customer account
    pub fn new(email: String, username: String, phone: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email,
            username,
            phone,
            role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_is_customer() {
        let u = User::new("a@example.com".to_string(), "alice".to_string(), None);
        assert_eq!(u.role, UserRole::Customer);
    }

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(UserRole::from_str("customer"), Some(UserRole::Customer));
        assert_eq!(UserRole::from_str("PARTNER"), Some(UserRole::Partner));
        assert_eq!(UserRole::from_str("admin"), None);
        assert_eq!(UserRole::Partner.to_string(), "partner");
    }

    #[test]
    fn test_is_partner() {
        assert!(!UserRole::Customer.is_partner());
        assert!(UserRole::Partner.is_partner());
    }
}
