//! Kiosk repository implementation
//!
//! One kiosk per store; the binding is written once at store registration.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use tabling_core::{
    models::Kiosk,
    traits::{KioskRepository, Repository},
    AppError, AppResult,
};

/// PostgreSQL implementation of KioskRepository
pub struct PgKioskRepository {
    pool: PgPool,
}

impl PgKioskRepository {
    /// Create a new kiosk repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Kiosk, i64> for PgKioskRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Kiosk>> {
        debug!("Finding kiosk by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, KioskRow>(
            "SELECT id, store_id, created_at FROM kiosks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding kiosk {}: {}", id, e);
            AppError::Database(format!("Failed to find kiosk: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Kiosk>> {
        let rows = sqlx::query_as::<sqlx::Postgres, KioskRow>(
            "SELECT id, store_id, created_at FROM kiosks ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding kiosks: {}", e);
            AppError::Database(format!("Failed to fetch kiosks: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM kiosks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting kiosks: {}", e);
                AppError::Database(format!("Failed to count kiosks: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Kiosk) -> AppResult<Kiosk> {
        debug!("Registering kiosk for store: {}", entity.store_id);

        let row = sqlx::query_as::<sqlx::Postgres, KioskRow>(
            r#"
            INSERT INTO kiosks (store_id)
            VALUES ($1)
            RETURNING id, store_id, created_at
            "#,
        )
        .bind(entity.store_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating kiosk: {}", e);
            AppError::Database(format!("Failed to create kiosk: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, _entity))]
    async fn update(&self, _entity: &Kiosk) -> AppResult<Kiosk> {
        // the store binding is immutable after registration
        Err(AppError::InvalidInput(
            "kiosk bindings cannot be updated".to_string(),
        ))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<bool> {
        debug!("Deleting kiosk: {}", id);

        let result = sqlx::query("DELETE FROM kiosks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting kiosk {}: {}", id, e);
                AppError::Database(format!("Failed to delete kiosk: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl KioskRepository for PgKioskRepository {
    #[instrument(skip(self))]
    async fn find_by_store(&self, store_id: i64) -> AppResult<Option<Kiosk>> {
        debug!("Finding kiosk for store: {}", store_id);

        let result = sqlx::query_as::<sqlx::Postgres, KioskRow>(
            "SELECT id, store_id, created_at FROM kiosks WHERE store_id = $1",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding kiosk by store: {}", e);
            AppError::Database(format!("Failed to find kiosk: {}", e))
        })?;

        Ok(result.map(Into::into))
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct KioskRow {
    id: i64,
    store_id: i64,
    created_at: DateTime<Utc>,
}

impl From<KioskRow> for Kiosk {
    fn from(row: KioskRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            created_at: row.created_at,
        }
    }
}
