//! Review repository implementation
//!
//! Provides PostgreSQL-backed storage for reviews. The reservation_id
//! column carries a UNIQUE constraint, backing the at-most-one-review-per-
//! reservation invariant at the storage level.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use tabling_core::{
    models::Review,
    traits::{Repository, ReviewRepository},
    AppError, AppResult,
};

/// PostgreSQL implementation of ReviewRepository
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new review repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REVIEW_COLUMNS: &str = r#"
    id, reservation_id, customer_id, store_id, star, content,
    created_at, updated_at
"#;

#[async_trait]
impl Repository<Review, i64> for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Review>> {
        debug!("Finding review by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            "SELECT {} FROM reviews WHERE id = $1",
            REVIEW_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding review {}: {}", id, e);
            AppError::Database(format!("Failed to find review: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Review>> {
        let rows = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            "SELECT {} FROM reviews ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            REVIEW_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding reviews: {}", e);
            AppError::Database(format!("Failed to fetch reviews: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting reviews: {}", e);
                AppError::Database(format!("Failed to count reviews: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Review) -> AppResult<Review> {
        debug!(
            "Creating review for reservation {} by customer {}",
            entity.reservation_id, entity.customer_id
        );

        let row = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            r#"
            INSERT INTO reviews (reservation_id, customer_id, store_id, star, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(entity.reservation_id)
        .bind(entity.customer_id)
        .bind(entity.store_id)
        .bind(entity.star)
        .bind(&entity.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating review: {}", e);
            AppError::Database(format!("Failed to create review: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Review) -> AppResult<Review> {
        debug!("Updating review: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            r#"
            UPDATE reviews
            SET star = $2,
                content = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            REVIEW_COLUMNS
        ))
        .bind(entity.id)
        .bind(entity.star)
        .bind(&entity.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating review {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update review: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<bool> {
        debug!("Deleting review: {}", id);

        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting review {}: {}", id, e);
                AppError::Database(format!("Failed to delete review: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_reservation(&self, reservation_id: i64) -> AppResult<Option<Review>> {
        debug!("Finding review for reservation: {}", reservation_id);

        let result = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            "SELECT {} FROM reviews WHERE reservation_id = $1",
            REVIEW_COLUMNS
        ))
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding review by reservation: {}", e);
            AppError::Database(format!("Failed to find review: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_by_store(
        &self,
        store_id: i64,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Review>> {
        debug!("Finding reviews for store: {}", store_id);

        let rows = sqlx::query_as::<sqlx::Postgres, ReviewRow>(&format!(
            "SELECT {} FROM reviews WHERE store_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            REVIEW_COLUMNS
        ))
        .bind(store_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding store reviews: {}", e);
            AppError::Database(format!("Failed to fetch store reviews: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_store(&self, store_id: i64) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE store_id = $1")
            .bind(store_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting store reviews: {}", e);
                AppError::Database(format!("Failed to count store reviews: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self))]
    async fn delete_all_by_store(&self, store_id: i64) -> AppResult<i64> {
        debug!("Deleting reviews for store {}", store_id);

        let result = sqlx::query("DELETE FROM reviews WHERE store_id = $1")
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting store reviews: {}", e);
                AppError::Database(format!("Failed to delete store reviews: {}", e))
            })?;

        Ok(result.rows_affected() as i64)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    reservation_id: i64,
    customer_id: i64,
    store_id: i64,
    star: i32,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
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
