//! Reservation model
//!
//! A reservation ties a customer to a store at a specific time. It moves
//! through an approval axis (requested -> approved/declined, decided once by
//! the store owner) and two one-way boolean axes: `visited` flips on a
//! successful kiosk check-in, `reviewed` flips when the visit is reviewed.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApproveStatus {
    /// Waiting for the store owner's decision
    #[default]
    Requested,
    /// Accepted by the store owner
    Approved,
    /// Rejected by the store owner
    Declined,
}

impl fmt::Display for ApproveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApproveStatus::Requested => write!(f, "requested"),
            ApproveStatus::Approved => write!(f, "approved"),
            ApproveStatus::Declined => write!(f, "declined"),
        }
    }
}

impl ApproveStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "requested" => Some(ApproveStatus::Requested),
            "approved" => Some(ApproveStatus::Approved),
            "declined" => Some(ApproveStatus::Declined),
            _ => None,
        }
    }

    /// Check if the owner has already decided on this reservation
    pub fn is_decided(&self) -> bool {
        !matches!(self, ApproveStatus::Requested)
    }
}

/// Reservation entity
///
/// Lifecycle:
/// 1. Created on booking request (Requested, not visited, not reviewed)
/// 2. Approved or Declined exactly once by the owning store's partner
/// 3. `visited` flips exactly once via a successful kiosk check-in
/// 4. `reviewed` flips exactly once when the visit is reviewed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier
    pub id: i64,

    /// Store being visited
    pub store_id: i64,

    /// Customer who booked the slot
    pub customer_id: i64,

    /// Contact number presented at booking time
    pub contact_number: String,

    /// Numeric visit authorization code, immutable once issued
    pub code: String,

    /// Reserved visit time
    pub reserved_at: DateTime<Utc>,

    /// Approval status
    pub approve_status: ApproveStatus,

    /// Whether the customer has checked in
    pub visited: bool,

    /// Whether the visit has been reviewed
    pub reviewed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a new reservation request
    pub fn new(
        store_id: i64,
        customer_id: i64,
        contact_number: String,
        reserved_at: DateTime<Utc>,
        code: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            store_id,
            customer_id,
            contact_number,
            code,
            reserved_at,
            approve_status: ApproveStatus::Requested,
            visited: false,
            reviewed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Generate a random numeric visit authorization code
    pub fn generate_code(length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10)))
            .collect()
    }

    /// Check if `now` falls within the allowed visit window around the
    /// reserved time. The window width is a configuration value, not a
    /// property of the reservation itself.
    pub fn within_visit_window(&self, now: DateTime<Utc>, window_minutes: i64) -> bool {
        let window = Duration::minutes(window_minutes);
        now >= self.reserved_at - window && now <= self.reserved_at + window
    }

    /// Check if this reservation is eligible for a review
    pub fn can_review(&self) -> bool {
        self.visited && !self.reviewed
    }

    /// Check the lifecycle invariant: reviewed implies visited implies approved
    pub fn is_consistent(&self) -> bool {
        (!self.reviewed || self.visited)
            && (!self.visited || self.approve_status == ApproveStatus::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Reservation {
        Reservation::new(
            1,
            10,
            "010-1111-2222".to_string(),
            Utc::now(),
            "4821".to_string(),
        )
    }

    #[test]
    fn test_new_reservation_state() {
        let r = sample();
        assert_eq!(r.approve_status, ApproveStatus::Requested);
        assert!(!r.visited);
        assert!(!r.reviewed);
        assert!(r.is_consistent());
    }

    #[test]
    fn test_approve_status_roundtrip() {
        for s in [
            ApproveStatus::Requested,
            ApproveStatus::Approved,
            ApproveStatus::Declined,
        ] {
            assert_eq!(ApproveStatus::from_str(&s.to_string()), Some(s));
        }
        assert_eq!(ApproveStatus::from_str("bogus"), None);
    }

    #[test]
    fn test_is_decided() {
        assert!(!ApproveStatus::Requested.is_decided());
        assert!(ApproveStatus::Approved.is_decided());
        assert!(ApproveStatus::Declined.is_decided());
    }

    #[test]
    fn test_generate_code_is_numeric() {
        let code = Reservation::generate_code(4);
        assert_eq!(code.len(), 4);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_visit_window_bounds() {
        let r = sample();
        let at = r.reserved_at;

        assert!(r.within_visit_window(at, 10));
        assert!(r.within_visit_window(at - Duration::minutes(10), 10));
        assert!(r.within_visit_window(at + Duration::minutes(10), 10));
        assert!(!r.within_visit_window(at - Duration::minutes(11), 10));
        assert!(!r.within_visit_window(at + Duration::minutes(11), 10));
    }

    #[test]
    fn test_lifecycle_invariant() {
        let mut r = sample();

        // visited without approval breaks the invariant
        r.visited = true;
        assert!(!r.is_consistent());

        r.approve_status = ApproveStatus::Approved;
        assert!(r.is_consistent());

        // reviewed requires visited
        r.reviewed = true;
        assert!(r.is_consistent());
        r.visited = false;
        assert!(!r.is_consistent());
    }

    #[test]
    fn test_can_review() {
        let mut r = sample();
        assert!(!r.can_review());

        r.approve_status = ApproveStatus::Approved;
        r.visited = true;
        assert!(r.can_review());

        r.reviewed = true;
        assert!(!r.can_review());
    }
}
