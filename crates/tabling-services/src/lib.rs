//! Business logic services for Tabling
//!
//! This crate contains the services that orchestrate the reservation
//! lifecycle: booking, partner confirmation, kiosk check-in, reviews with
//! rating aggregation, and store management.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service owns its dependencies (repositories, pool)
//! - Services are wrapped in Arc for safe sharing across async tasks
//! - All operations are instrumented with tracing
//! - Comprehensive error handling with AppError
//!
//! # Services
//!
//! - `ReservationService` - booking, partner timetable, confirm/decline
//! - `CheckInService` - kiosk gateway validating walk-in visits
//! - `ReviewService` - review lifecycle with transactional rating refresh
//! - `StoreService` - store management with kiosk registration and cascade delete
//! - `PartnerService` - partner enrollment

pub mod checkin;
pub mod partner;
pub mod reservation;
pub mod review;
pub mod store;

pub use checkin::CheckInService;
pub use partner::PartnerService;
pub use reservation::ReservationService;
pub use review::ReviewService;
pub use store::StoreService;

use tabling_core::{AppError, AppResult};

/// Shared authorization check: the claimed actor must be the resource owner.
///
/// Used by every operation where a partner or customer acts on something
/// they must own (confirm/decline, review mutation, store management).
pub fn ensure_owner(actor_id: i64, owner_id: i64) -> AppResult<()> {
    if actor_id == owner_id {
        Ok(())
    } else {
        Err(AppError::OwnerMismatch)
    }
}

#[cfg(test)]
pub(crate) mod testutil;
