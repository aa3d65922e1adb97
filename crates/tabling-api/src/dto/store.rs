//! Store and kiosk DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabling_core::models::{Kiosk, Store};
use validator::Validate;

/// Store registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoreCreateRequest {
    /// Owning partner
    pub owner_id: i64,

    /// Store name
    #[validate(length(min = 1, max = 100, message = "Store name is required"))]
    pub name: String,

    /// Store description
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,

    /// Latitude in degrees
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    /// Longitude in degrees
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Store update request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoreUpdateRequest {
    /// Acting partner, must be the owner
    pub owner_id: i64,

    /// New name
    #[validate(length(min = 1, max = 100, message = "Store name is required"))]
    pub name: String,

    /// New description
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,

    /// Whether the store accepts reservations
    pub is_available: bool,

    /// Latitude in degrees
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    /// Longitude in degrees
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Query parameters identifying the acting partner
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerParams {
    /// Acting partner
    pub owner_id: i64,
}

/// Query parameters for the public store listing
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StoreListParams {
    /// Sort order: "name" (default) or "star"
    #[serde(default)]
    pub sort: Option<String>,
}

/// Store response
#[derive(Debug, Clone, Serialize)]
pub struct StoreResponse {
    /// Store ID
    pub id: i64,

    /// Owning partner
    pub owner_id: i64,

    /// Store name
    pub name: String,

    /// Store description
    pub description: String,

    /// Mean star rating over current reviews
    pub star: f64,

    /// Whether the store accepts reservations
    pub is_available: bool,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Store> for StoreResponse {
    fn from(s: Store) -> Self {
        Self {
            id: s.id,
            owner_id: s.owner_id,
            name: s.name,
            description: s.description,
            star: s.star,
            is_available: s.is_available,
            latitude: s.latitude,
            longitude: s.longitude,
            created_at: s.created_at,
        }
    }
}

/// Kiosk response
#[derive(Debug, Clone, Serialize)]
pub struct KioskResponse {
    /// Kiosk ID
    pub id: i64,

    /// Bound store
    pub store_id: i64,
}

impl From<Kiosk> for KioskResponse {
    fn from(k: Kiosk) -> Self {
        Self {
            id: k.id,
            store_id: k.store_id,
        }
    }
}

/// Store registration response carrying the new kiosk binding
#[derive(Debug, Clone, Serialize)]
pub struct StoreCreatedResponse {
    /// The new store
    pub store: StoreResponse,

    /// The kiosk bound to it
    pub kiosk: KioskResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_create_validation() {
        let req = StoreCreateRequest {
            owner_id: 1,
            name: "Cafe".to_string(),
            description: String::new(),
            latitude: 37.5,
            longitude: 127.0,
        };
        assert!(req.validate().is_ok());

        let req = StoreCreateRequest {
            latitude: 95.0,
            ..req
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_store_response_from_model() {
        let s = Store::new(2, "Cafe".to_string(), "Corner cafe".to_string(), 37.5, 127.0);
        let resp = StoreResponse::from(s);
        assert_eq!(resp.owner_id, 2);
        assert_eq!(resp.star, 0.0);
        assert!(resp.is_available);
    }
}
