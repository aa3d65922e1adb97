//! Kiosk check-in service
//!
//! Validates a walk-in visit against the reservation it claims. The checks
//! run in a fixed order so the kiosk can show a precise failure reason, and
//! nothing is written until every check has passed. The final `visited` flip
//! is a conditional update, so two kiosks racing the same reservation
//! produce exactly one greeting.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use tabling_core::{
    models::{Kiosk, Reservation},
    traits::{KioskRepository, ReservationRepository, UserRepository},
    AppError, AppResult,
};

/// Service backing the in-store kiosk
pub struct CheckInService<K, R, U>
where
    K: KioskRepository,
    R: ReservationRepository,
    U: UserRepository,
{
    kiosk_repo: Arc<K>,
    reservation_repo: Arc<R>,
    user_repo: Arc<U>,
    visit_window_minutes: i64,
}

impl<K, R, U> CheckInService<K, R, U>
where
    K: KioskRepository,
    R: ReservationRepository,
    U: UserRepository,
{
    /// Create a new check-in service
    pub fn new(
        kiosk_repo: Arc<K>,
        reservation_repo: Arc<R>,
        user_repo: Arc<U>,
        visit_window_minutes: i64,
    ) -> Self {
        Self {
            kiosk_repo,
            reservation_repo,
            user_repo,
            visit_window_minutes,
        }
    }

    /// Validate a visit claim against the loaded kiosk and reservation.
    ///
    /// Check order, each with its own error:
    /// 1. the kiosk must belong to the reservation's store
    /// 2. the presented contact number must match
    /// 3. the presented visit code must match
    /// 4. the reservation must be approved
    /// 5. `now` must fall within the visit window around the reserved time
    /// 6. the reservation must not have been visited yet
    pub fn validate_visit(
        kiosk: &Kiosk,
        reservation: &Reservation,
        contact_number: &str,
        code: &str,
        now: DateTime<Utc>,
        window_minutes: i64,
    ) -> AppResult<()> {
        if kiosk.store_id != reservation.store_id {
            return Err(AppError::KioskStoreMismatch);
        }
        if reservation.contact_number != contact_number {
            return Err(AppError::ContactMismatch);
        }
        if reservation.code != code {
            return Err(AppError::CodeMismatch);
        }
        if reservation.approve_status != tabling_core::models::ApproveStatus::Approved {
            return Err(AppError::ReservationNotApproved);
        }
        if !reservation.within_visit_window(now, window_minutes) {
            return Err(AppError::ReservationExpired);
        }
        if reservation.visited {
            return Err(AppError::AlreadyVisited);
        }
        Ok(())
    }

    /// Check a customer in at a kiosk. Returns the customer's username for
    /// the kiosk greeting.
    #[instrument(skip(self, contact_number, code))]
    pub async fn check_in(
        &self,
        kiosk_id: i64,
        reservation_id: i64,
        contact_number: &str,
        code: &str,
    ) -> AppResult<String> {
        self.check_in_at(kiosk_id, reservation_id, contact_number, code, Utc::now())
            .await
    }

    /// Check in with an explicit clock
    pub async fn check_in_at(
        &self,
        kiosk_id: i64,
        reservation_id: i64,
        contact_number: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> AppResult<String> {
        let kiosk = self
            .kiosk_repo
            .find_by_id(kiosk_id)
            .await?
            .ok_or_else(|| AppError::KioskNotFound(kiosk_id.to_string()))?;

        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::ReservationNotFound(reservation_id.to_string()))?;

        Self::validate_visit(
            &kiosk,
            &reservation,
            contact_number,
            code,
            now,
            self.visit_window_minutes,
        )?;

        // conditional flip; losing the race means another kiosk already
        // checked this reservation in
        if !self.reservation_repo.mark_visited(reservation_id).await? {
            warn!("Concurrent check-in lost for reservation {}", reservation_id);
            return Err(AppError::AlreadyVisited);
        }

        let user = self
            .user_repo
            .find_by_id(reservation.customer_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(reservation.customer_id.to_string()))?;

        info!(
            "Reservation {} checked in at kiosk {}",
            reservation_id, kiosk_id
        );

        Ok(user.username)
    }
}
