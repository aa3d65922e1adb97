//! Store repository implementation
//!
//! Provides PostgreSQL-backed storage for stores, including the rating
//! refresh that keeps the stored mean equal to the mean of the current
//! review set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use tabling_core::{
    models::Store,
    traits::{Repository, StoreRepository},
    AppError, AppResult,
};

/// PostgreSQL implementation of StoreRepository
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    /// Create a new store repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const STORE_COLUMNS: &str = r#"
    id, owner_id, name, description, star, is_available,
    latitude, longitude, created_at, updated_at
"#;

/// Recompute a store's mean rating inside an existing transaction.
///
/// This is the single authoritative rating formula: the mean over the
/// store's current reviews after the triggering mutation, 0.0 when no
/// reviews remain. Used by the review service so the rating refresh
/// commits or rolls back together with the review write.
pub async fn refresh_rating_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    store_id: i64,
) -> AppResult<f64> {
    let row: (f64,) = sqlx::query_as(
        r#"
        UPDATE stores
        SET star = COALESCE(
                (SELECT AVG(star)::DOUBLE PRECISION FROM reviews WHERE store_id = $1),
                0.0
            ),
            updated_at = NOW()
        WHERE id = $1
        RETURNING star
        "#,
    )
    .bind(store_id)
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| {
        error!("Database error refreshing rating for store {}: {}", store_id, e);
        AppError::Database(format!("Failed to refresh store rating: {}", e))
    })?;

    Ok(row.0)
}

#[async_trait]
impl Repository<Store, i64> for PgStoreRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Store>> {
        debug!("Finding store by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, StoreRow>(&format!(
            "SELECT {} FROM stores WHERE id = $1",
            STORE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding store {}: {}", id, e);
            AppError::Database(format!("Failed to find store: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Store>> {
        let rows = sqlx::query_as::<sqlx::Postgres, StoreRow>(&format!(
            "SELECT {} FROM stores ORDER BY id LIMIT $1 OFFSET $2",
            STORE_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding stores: {}", e);
            AppError::Database(format!("Failed to fetch stores: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stores")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting stores: {}", e);
                AppError::Database(format!("Failed to count stores: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Store) -> AppResult<Store> {
        debug!("Creating store '{}' for owner {}", entity.name, entity.owner_id);

        let row = sqlx::query_as::<sqlx::Postgres, StoreRow>(&format!(
            r#"
            INSERT INTO stores (
                owner_id, name, description, star, is_available, latitude, longitude
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            STORE_COLUMNS
        ))
        .bind(entity.owner_id)
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(entity.star)
        .bind(entity.is_available)
        .bind(entity.latitude)
        .bind(entity.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating store: {}", e);
            AppError::Database(format!("Failed to create store: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Store) -> AppResult<Store> {
        debug!("Updating store: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, StoreRow>(&format!(
            r#"
            UPDATE stores
            SET name = $2,
                description = $3,
                is_available = $4,
                latitude = $5,
                longitude = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            STORE_COLUMNS
        ))
        .bind(entity.id)
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(entity.is_available)
        .bind(entity.latitude)
        .bind(entity.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating store {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update store: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<bool> {
        debug!("Deleting store: {}", id);

        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting store {}: {}", id, e);
                AppError::Database(format!("Failed to delete store: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StoreRepository for PgStoreRepository {
    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: i64) -> AppResult<Vec<Store>> {
        debug!("Finding stores for owner: {}", owner_id);

        let rows = sqlx::query_as::<sqlx::Postgres, StoreRow>(&format!(
            "SELECT {} FROM stores WHERE owner_id = $1 ORDER BY id",
            STORE_COLUMNS
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding stores by owner: {}", e);
            AppError::Database(format!("Failed to fetch owner stores: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn list_by_name(&self, limit: i64, offset: i64) -> AppResult<(Vec<Store>, i64)> {
        let rows = sqlx::query_as::<sqlx::Postgres, StoreRow>(&format!(
            "SELECT {} FROM stores ORDER BY name ASC LIMIT $1 OFFSET $2",
            STORE_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing stores by name: {}", e);
            AppError::Database(format!("Failed to list stores: {}", e))
        })?;

        let total = self.count().await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    #[instrument(skip(self))]
    async fn list_by_star(&self, limit: i64, offset: i64) -> AppResult<(Vec<Store>, i64)> {
        let rows = sqlx::query_as::<sqlx::Postgres, StoreRow>(&format!(
            "SELECT {} FROM stores ORDER BY star DESC, id ASC LIMIT $1 OFFSET $2",
            STORE_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing stores by star: {}", e);
            AppError::Database(format!("Failed to list stores: {}", e))
        })?;

        let total = self.count().await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    #[instrument(skip(self))]
    async fn refresh_rating(&self, store_id: i64) -> AppResult<f64> {
        debug!("Refreshing rating for store {}", store_id);

        let row: (f64,) = sqlx::query_as(
            r#"
            UPDATE stores
            SET star = COALESCE(
                    (SELECT AVG(star)::DOUBLE PRECISION FROM reviews WHERE store_id = $1),
                    0.0
                ),
                updated_at = NOW()
            WHERE id = $1
            RETURNING star
            "#,
        )
        .bind(store_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error refreshing store rating: {}", e);
            AppError::Database(format!("Failed to refresh store rating: {}", e))
        })?;

        Ok(row.0)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: String,
    star: f64,
    is_available: bool,
    latitude: f64,
    longitude: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            star: row.star,
            is_available: row.is_available,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
