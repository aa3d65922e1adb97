//! Review service
//!
//! One review per visited reservation. Every mutation that touches the
//! review set recomputes the store's mean rating inside the same database
//! transaction, so the stored aggregate never drifts from the review rows.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, instrument};

use tabling_core::{
    models::{Reservation, Review},
    traits::{
        PaginatedResponse, Pagination, PaginationMeta, ReservationRepository, ReviewRepository,
    },
    AppError, AppResult,
};
use tabling_db::repositories::store_repo::refresh_rating_tx;

use crate::ensure_owner;

/// Service for the review lifecycle and the rating aggregate
pub struct ReviewService<R, V>
where
    R: ReservationRepository,
    V: ReviewRepository,
{
    reservation_repo: Arc<R>,
    review_repo: Arc<V>,
    pool: PgPool,
}

impl<R, V> ReviewService<R, V>
where
    R: ReservationRepository,
    V: ReviewRepository,
{
    /// Create a new review service
    pub fn new(reservation_repo: Arc<R>, review_repo: Arc<V>, pool: PgPool) -> Self {
        Self {
            reservation_repo,
            review_repo,
            pool,
        }
    }

    /// Eligibility checks for writing a review: the caller must be the
    /// booking customer, the visit must have happened, and the reservation
    /// must not have been reviewed already.
    pub fn ensure_reviewable(reservation: &Reservation, customer_id: i64) -> AppResult<()> {
        ensure_owner(customer_id, reservation.customer_id)?;
        if !reservation.visited {
            return Err(AppError::ReservationNotVisited);
        }
        if reservation.reviewed {
            return Err(AppError::AlreadyReviewed);
        }
        Ok(())
    }

    /// Write a review for a visited reservation.
    ///
    /// The `reviewed` flip, the review insert, and the rating refresh all
    /// commit or roll back together. The flip is conditional, so a
    /// concurrent duplicate submission surfaces as a conflict.
    #[instrument(skip(self, content))]
    pub async fn create_review(
        &self,
        customer_id: i64,
        reservation_id: i64,
        star: i32,
        content: String,
    ) -> AppResult<Review> {
        if !Review::is_valid_star(star) {
            return Err(AppError::InvalidInput(format!(
                "star rating must be between 0 and 5, got {}",
                star
            )));
        }

        let reservation = self
            .reservation_repo
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::ReservationNotFound(reservation_id.to_string()))?;

        Self::ensure_reviewable(&reservation, customer_id)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin review transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        let flipped = sqlx::query(
            r#"
            UPDATE reservations
            SET reviewed = TRUE, updated_at = NOW()
            WHERE id = $1 AND reviewed = FALSE
            "#,
        )
        .bind(reservation_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error flagging reservation as reviewed: {}", e);
            AppError::Database(format!("Failed to flag reservation: {}", e))
        })?;

        if flipped.rows_affected() == 0 {
            // dropping the transaction rolls it back
            return Err(AppError::AlreadyReviewed);
        }

        let row: ReviewRow = sqlx::query_as(
            r#"
            INSERT INTO reviews (reservation_id, customer_id, store_id, star, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, reservation_id, customer_id, store_id, star, content,
                      created_at, updated_at
            "#,
        )
        .bind(reservation_id)
        .bind(customer_id)
        .bind(reservation.store_id)
        .bind(star)
        .bind(&content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating review: {}", e);
            AppError::Database(format!("Failed to create review: {}", e))
        })?;

        let new_star = refresh_rating_tx(&mut tx, reservation.store_id).await?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit review transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        info!(
            "Review {} created for reservation {}, store {} rating now {}",
            row.id, reservation_id, reservation.store_id, new_star
        );

        Ok(row.into())
    }

    /// Change the star or content of an existing review and refresh the
    /// store rating in the same transaction
    #[instrument(skip(self, content))]
    pub async fn update_review(
        &self,
        customer_id: i64,
        review_id: i64,
        star: i32,
        content: String,
    ) -> AppResult<Review> {
        if !Review::is_valid_star(star) {
            return Err(AppError::InvalidInput(format!(
                "star rating must be between 0 and 5, got {}",
                star
            )));
        }

        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::ReviewNotFound(review_id.to_string()))?;

        ensure_owner(customer_id, review.customer_id)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin review transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        let row: ReviewRow = sqlx::query_as(
            r#"
            UPDATE reviews
            SET star = $2, content = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, reservation_id, customer_id, store_id, star, content,
                      created_at, updated_at
            "#,
        )
        .bind(review_id)
        .bind(star)
        .bind(&content)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error updating review {}: {}", review_id, e);
            AppError::Database(format!("Failed to update review: {}", e))
        })?;

        refresh_rating_tx(&mut tx, review.store_id).await?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit review transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        Ok(row.into())
    }

    /// Delete a review and refresh the store rating in the same transaction.
    /// The reservation keeps its `reviewed` flag; deleting a review does not
    /// reopen the slot for another one.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, customer_id: i64, review_id: i64) -> AppResult<()> {
        let review = self
            .review_repo
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::ReviewNotFound(review_id.to_string()))?;

        ensure_owner(customer_id, review.customer_id)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin review transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Database error deleting review {}: {}", review_id, e);
                AppError::Database(format!("Failed to delete review: {}", e))
            })?;

        let new_star = refresh_rating_tx(&mut tx, review.store_id).await?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit review transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        info!(
            "Review {} deleted, store {} rating now {}",
            review_id, review.store_id, new_star
        );

        Ok(())
    }

    /// Fetch a single review
    #[instrument(skip(self))]
    pub async fn get_review(&self, id: i64) -> AppResult<Review> {
        self.review_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReviewNotFound(id.to_string()))
    }

    /// List a store's reviews, newest first
    #[instrument(skip(self))]
    pub async fn list_store_reviews(
        &self,
        store_id: i64,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Review>> {
        let reviews = self
            .review_repo
            .find_by_store(store_id, pagination.limit(), pagination.offset())
            .await?;
        let total = self.review_repo.count_by_store(store_id).await?;

        Ok(PaginatedResponse {
            data: reviews,
            pagination: PaginationMeta::new(total, pagination.page, pagination.per_page),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    reservation_id: i64,
    customer_id: i64,
    store_id: i64,
    star: i32,
    content: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            id: row.id,
            reservation_id: row.reservation_id,
            customer_id: row.customer_id,
            store_id: row.store_id,
            star: row.star,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;
    use tabling_core::models::ApproveStatus;
    use tabling_db::repositories::{PgReservationRepository, PgReviewRepository};

    type Svc = ReviewService<MemReservationRepository, MemReviewRepository>;

    fn visited_reservation() -> Reservation {
        let mut r = reservation(1, 1, 10);
        r.approve_status = ApproveStatus::Approved;
        r.visited = true;
        r
    }

    #[test]
    fn test_reviewable_requires_visit() {
        let mut r = reservation(1, 1, 10);
        r.approve_status = ApproveStatus::Approved;
        let err = Svc::ensure_reviewable(&r, 10).unwrap_err();
        assert!(matches!(err, AppError::ReservationNotVisited));
    }

    #[test]
    fn test_reviewable_rejects_second_review() {
        let mut r = visited_reservation();
        r.reviewed = true;
        let err = Svc::ensure_reviewable(&r, 10).unwrap_err();
        assert!(matches!(err, AppError::AlreadyReviewed));
    }

    #[test]
    fn test_reviewable_requires_booking_customer() {
        let r = visited_reservation();
        let err = Svc::ensure_reviewable(&r, 11).unwrap_err();
        assert!(matches!(err, AppError::OwnerMismatch));
    }

    #[test]
    fn test_reviewable_ok() {
        let r = visited_reservation();
        assert!(Svc::ensure_reviewable(&r, 10).is_ok());
    }

    #[tokio::test]
    #[ignore] // Requires database
    async fn test_create_review_refreshes_rating() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = tabling_db::create_pool(&url, Some(5)).await.unwrap();
        let svc = ReviewService::new(
            Arc::new(PgReservationRepository::new(pool.clone())),
            Arc::new(PgReviewRepository::new(pool.clone())),
            pool,
        );
        // assumes a seeded visited, unreviewed reservation with id 1
        let review = svc
            .create_review(10, 1, 4, "good".to_string())
            .await
            .unwrap();
        assert_eq!(review.star, 4);

        let err = svc
            .create_review(10, 1, 5, "again".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyReviewed));
    }
}
