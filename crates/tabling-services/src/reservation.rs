//! Reservation service
//!
//! Booking on the customer side, timetable plus confirm/decline on the
//! partner side. A reservation is decided exactly once; the decision is a
//! conditional update in the repository so concurrent confirm/decline
//! requests resolve to a single winner.

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use tabling_core::{
    models::{ApproveStatus, Reservation},
    traits::{ReservationRepository, StoreRepository, UserRepository},
    AppError, AppResult,
};

use crate::ensure_owner;

/// Service for the reservation lifecycle up to the visit
pub struct ReservationService<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: ReservationRepository,
{
    user_repo: Arc<U>,
    store_repo: Arc<S>,
    reservation_repo: Arc<R>,
    code_length: usize,
}

impl<U, S, R> ReservationService<U, S, R>
where
    U: UserRepository,
    S: StoreRepository,
    R: ReservationRepository,
{
    /// Create a new reservation service
    pub fn new(
        user_repo: Arc<U>,
        store_repo: Arc<S>,
        reservation_repo: Arc<R>,
        code_length: usize,
    ) -> Self {
        Self {
            user_repo,
            store_repo,
            reservation_repo,
            code_length,
        }
    }

    /// Book a slot at a store. The reservation starts in `requested` and
    /// carries a freshly issued numeric visit code.
    #[instrument(skip(self))]
    pub async fn make_reservation(
        &self,
        customer_id: i64,
        store_id: i64,
        contact_number: String,
        reserved_at: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        self.user_repo
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(customer_id.to_string()))?;

        let store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or_else(|| AppError::StoreNotFound(store_id.to_string()))?;

        if !store.is_available {
            warn!("Booking rejected, store {} is unavailable", store_id);
            return Err(AppError::StoreUnavailable);
        }

        let code = Reservation::generate_code(self.code_length);
        let reservation =
            Reservation::new(store_id, customer_id, contact_number, reserved_at, code);

        let created = self.reservation_repo.create(&reservation).await?;
        info!(
            "Reservation {} booked at store {} for customer {}",
            created.id, store_id, customer_id
        );

        Ok(created)
    }

    /// Fetch a single reservation
    #[instrument(skip(self))]
    pub async fn get_reservation(&self, id: i64) -> AppResult<Reservation> {
        self.reservation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReservationNotFound(id.to_string()))
    }

    /// List a partner's reservations across all their stores for one day,
    /// ordered by reserved time
    #[instrument(skip(self))]
    pub async fn timetable(
        &self,
        partner_id: i64,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        let partner = self
            .user_repo
            .find_by_id(partner_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(partner_id.to_string()))?;

        if !partner.role.is_partner() {
            return Err(AppError::PartnerNotEnrolled);
        }

        self.reservation_repo
            .find_for_partner_on(partner_id, date)
            .await
    }

    /// Approve a requested reservation
    #[instrument(skip(self))]
    pub async fn confirm(&self, partner_id: i64, reservation_id: i64) -> AppResult<Reservation> {
        self.decide(partner_id, reservation_id, ApproveStatus::Approved)
            .await
    }

    /// Decline a requested reservation
    #[instrument(skip(self))]
    pub async fn decline(&self, partner_id: i64, reservation_id: i64) -> AppResult<Reservation> {
        self.decide(partner_id, reservation_id, ApproveStatus::Declined)
            .await
    }

    async fn decide(
        &self,
        partner_id: i64,
        reservation_id: i64,
        decision: ApproveStatus,
    ) -> AppResult<Reservation> {
        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::ReservationNotFound(reservation_id.to_string()))?;

        let store = self
            .store_repo
            .find_by_id(reservation.store_id)
            .await?
            .ok_or_else(|| AppError::StoreNotFound(reservation.store_id.to_string()))?;

        ensure_owner(partner_id, store.owner_id)?;

        // conditional flip; None means another decision already landed
        let decided = self
            .reservation_repo
            .decide(reservation_id, decision)
            .await?
            .ok_or(AppError::ReservationAlreadyDecided)?;

        info!(
            "Reservation {} decided as {} by partner {}",
            reservation_id, decision, partner_id
        );

        Ok(decided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    fn service(
        users: Vec<tabling_core::models::User>,
        stores: Vec<tabling_core::models::Store>,
        reservations: Vec<Reservation>,
    ) -> ReservationService<MemUserRepository, MemStoreRepository, MemReservationRepository> {
        ReservationService::new(
            Arc::new(MemUserRepository::with(users)),
            Arc::new(MemStoreRepository::with(stores)),
            Arc::new(MemReservationRepository::with(reservations)),
            4,
        )
    }

    #[tokio::test]
    async fn test_make_reservation() {
        let svc = service(
            vec![customer(1, "alice"), partner(2, "bob")],
            vec![store(1, 2, "Cafe")],
            vec![],
        );

        let r = svc
            .make_reservation(1, 1, "010-1234-5678".to_string(), Utc::now())
            .await
            .unwrap();

        assert_eq!(r.approve_status, ApproveStatus::Requested);
        assert_eq!(r.code.len(), 4);
        assert!(!r.visited);
        assert!(!r.reviewed);
    }

    #[tokio::test]
    async fn test_make_reservation_unavailable_store() {
        let mut s = store(1, 2, "Cafe");
        s.is_available = false;
        let svc = service(vec![customer(1, "alice")], vec![s], vec![]);

        let err = svc
            .make_reservation(1, 1, "010-1234-5678".to_string(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable));
    }

    #[tokio::test]
    async fn test_make_reservation_unknown_store() {
        let svc = service(vec![customer(1, "alice")], vec![], vec![]);

        let err = svc
            .make_reservation(1, 99, "010-1234-5678".to_string(), Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StoreNotFound(_)));
    }

    #[tokio::test]
    async fn test_confirm() {
        let svc = service(
            vec![partner(2, "bob")],
            vec![store(1, 2, "Cafe")],
            vec![reservation(1, 1, 10)],
        );

        let r = svc.confirm(2, 1).await.unwrap();
        assert_eq!(r.approve_status, ApproveStatus::Approved);
    }

    #[tokio::test]
    async fn test_decide_only_once() {
        let svc = service(
            vec![partner(2, "bob")],
            vec![store(1, 2, "Cafe")],
            vec![reservation(1, 1, 10)],
        );

        svc.confirm(2, 1).await.unwrap();
        let err = svc.decline(2, 1).await.unwrap_err();
        assert!(matches!(err, AppError::ReservationAlreadyDecided));
    }

    #[tokio::test]
    async fn test_decide_requires_ownership() {
        let svc = service(
            vec![partner(2, "bob"), partner(3, "eve")],
            vec![store(1, 2, "Cafe")],
            vec![reservation(1, 1, 10)],
        );

        let err = svc.confirm(3, 1).await.unwrap_err();
        assert!(matches!(err, AppError::OwnerMismatch));
    }

    #[tokio::test]
    async fn test_timetable_requires_partner() {
        let svc = service(vec![customer(1, "alice")], vec![], vec![]);

        let err = svc
            .timetable(1, Utc::now().date_naive())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PartnerNotEnrolled));
    }

    #[tokio::test]
    async fn test_timetable_orders_by_time() {
        let mut early = reservation(1, 1, 10);
        let mut late = reservation(2, 1, 11);
        let base = Utc::now();
        early.reserved_at = base;
        late.reserved_at = base + chrono::Duration::hours(2);

        let svc = service(
            vec![partner(2, "bob")],
            vec![store(1, 2, "Cafe")],
            vec![late, early],
        );

        let rows = svc.timetable(2, base.date_naive()).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
    }
}
