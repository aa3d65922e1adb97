//! Store model
//!
//! A store is owned by exactly one partner and carries the running mean of
//! its review stars. The stored mean must always equal the arithmetic mean
//! of the current review set; it is recomputed on every review mutation,
//! never drifted incrementally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Store entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    /// Unique identifier
    pub id: i64,

    /// Owning partner user
    pub owner_id: i64,

    /// Store name
    pub name: String,

    /// Store description
    pub description: String,

    /// Mean star rating over all current reviews (0.0 when unreviewed)
    pub star: f64,

    /// Whether the store currently accepts reservations
    pub is_available: bool,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Create a new store with an empty rating
    pub fn new(
        owner_id: i64,
        name: String,
        description: String,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            owner_id,
            name,
            description,
            star: 0.0,
            is_available: true,
            latitude,
            longitude,
            created_at: now,
            updated_at: now,
        }
    }

    /// The authoritative rating formula: arithmetic mean of the current
    /// review stars, 0.0 for an empty set. The SQL recompute mirrors this.
    pub fn mean_star(stars: &[i32]) -> f64 {
        if stars.is_empty() {
            return 0.0;
        }
        stars.iter().map(|s| f64::from(*s)).sum::<f64>() / stars.len() as f64
    }

    /// Check that a coordinate pair is within valid geographic bounds
    pub fn is_valid_location(latitude: f64, longitude: f64) -> bool {
        (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&latitude)
            && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&longitude)
    }
}
