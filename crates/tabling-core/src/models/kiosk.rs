//! Kiosk model
//!
//! One kiosk per store, bound at store registration and immutable after.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kiosk entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kiosk {
    /// Unique identifier
    pub id: i64,

    /// Store this kiosk is bound to
    pub store_id: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Kiosk {
    /// Create a kiosk bound to a store
    pub fn new(store_id: i64) -> Self {
        Self {
            id: 0,
            store_id,
            created_at: Utc::now(),
        }
    }
}
