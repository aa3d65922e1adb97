//! Common traits for repositories
//!
//! Defines abstractions for database access. State transitions that must
//! resolve races to exactly one winner (approve/decline, check-in, review
//! flag, partner enrollment) are expressed as conditional updates returning
//! whether the caller won the flip.

use crate::error::AppError;
use crate::models::{ApproveStatus, Kiosk, Reservation, Review, Store, User};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

/// Generic repository trait for CRUD operations
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Find entity by ID
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, AppError>;

    /// Find all entities with pagination
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<T>, AppError>;

    /// Count total entities
    async fn count(&self) -> Result<i64, AppError>;

    /// Create a new entity
    async fn create(&self, entity: &T) -> Result<T, AppError>;

    /// Update an existing entity
    async fn update(&self, entity: &T) -> Result<T, AppError>;

    /// Delete entity by ID
    async fn delete(&self, id: ID) -> Result<bool, AppError>;
}

/// User repository trait with specialized methods
#[async_trait]
pub trait UserRepository: Repository<User, i64> {
    /// Find user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Flip a customer to partner. Returns false when the user is already
    /// a partner (the flip is conditional on the current role).
    async fn promote_to_partner(&self, id: i64) -> Result<bool, AppError>;
}

/// Store repository trait with specialized methods
#[async_trait]
pub trait StoreRepository: Repository<Store, i64> {
    /// Find stores owned by a partner
    async fn find_by_owner(&self, owner_id: i64) -> Result<Vec<Store>, AppError>;

    /// List stores ordered by name, with total count
    async fn list_by_name(&self, limit: i64, offset: i64) -> Result<(Vec<Store>, i64), AppError>;

    /// List stores ordered by rating (highest first), with total count
    async fn list_by_star(&self, limit: i64, offset: i64) -> Result<(Vec<Store>, i64), AppError>;

    /// Recompute the store's mean rating from its current review set and
    /// write it back. Returns the new mean.
    async fn refresh_rating(&self, store_id: i64) -> Result<f64, AppError>;
}

/// Reservation repository trait with specialized methods
#[async_trait]
pub trait ReservationRepository: Repository<Reservation, i64> {
    /// List reservations for all stores owned by a partner on a given date,
    /// ordered by reserved time
    async fn find_for_partner_on(
        &self,
        partner_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError>;

    /// Decide a requested reservation (approve or decline). The transition
    /// is conditional on the current status still being `Requested`; returns
    /// None when another decision already landed.
    async fn decide(
        &self,
        id: i64,
        decision: ApproveStatus,
    ) -> Result<Option<Reservation>, AppError>;

    /// Flip `visited` to true. Conditional on `visited = false`; returns
    /// false when a concurrent check-in already won.
    async fn mark_visited(&self, id: i64) -> Result<bool, AppError>;

    /// Flip `reviewed` to true. Conditional on `reviewed = false`; returns
    /// false when the reservation was already reviewed.
    async fn mark_reviewed(&self, id: i64) -> Result<bool, AppError>;

    /// Delete all reservations belonging to a store (store cascade)
    async fn delete_all_by_store(&self, store_id: i64) -> Result<i64, AppError>;
}

/// Review repository trait with specialized methods
#[async_trait]
pub trait ReviewRepository: Repository<Review, i64> {
    /// Find the review written for a reservation, if any
    async fn find_by_reservation(&self, reservation_id: i64)
        -> Result<Option<Review>, AppError>;

    /// List reviews for a store, newest first
    async fn find_by_store(
        &self,
        store_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, AppError>;

    /// Count reviews for a store
    async fn count_by_store(&self, store_id: i64) -> Result<i64, AppError>;

    /// Delete all reviews belonging to a store (store cascade)
    async fn delete_all_by_store(&self, store_id: i64) -> Result<i64, AppError>;
}

/// Kiosk repository trait with specialized methods
#[async_trait]
pub trait KioskRepository: Repository<Kiosk, i64> {
    /// Find the kiosk bound to a store
    async fn find_by_store(&self, store_id: i64) -> Result<Option<Kiosk>, AppError>;
}

/// Pagination parameters
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 100),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination() {
        let p = Pagination::new(1, 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 10);

        let p = Pagination::new(3, 20);
        assert_eq!(p.offset(), 40);
        assert_eq!(p.limit(), 20);
    }

    #[test]
    fn test_pagination_bounds() {
        let p = Pagination::new(0, 10); // page 0 becomes 1
        assert_eq!(p.page, 1);

        let p = Pagination::new(1, 500); // per_page capped at 100
        assert_eq!(p.per_page, 100);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(95, 1, 10);
        assert_eq!(meta.total_pages, 10);

        let meta = PaginationMeta::new(101, 1, 10);
        assert_eq!(meta.total_pages, 11);
    }
}
