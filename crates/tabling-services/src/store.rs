//! Store service
//!
//! Partner-facing store management. Registration creates the store and its
//! kiosk binding in one transaction; deletion cascades over the store's
//! reviews, reservations, and kiosk in one transaction.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, instrument};

use tabling_core::{
    models::{Kiosk, Store},
    traits::{PaginatedResponse, Pagination, PaginationMeta, StoreRepository, UserRepository},
    AppError, AppResult,
};

use crate::ensure_owner;

/// Sort order for the public store listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreSort {
    /// Alphabetical by name
    #[default]
    Name,
    /// Highest rated first
    Star,
}

impl StoreSort {
    /// Parse from a query string value, defaulting to name order
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "star" => StoreSort::Star,
            _ => StoreSort::Name,
        }
    }
}

/// Service for store management and discovery
pub struct StoreService<U, S>
where
    U: UserRepository,
    S: StoreRepository,
{
    user_repo: Arc<U>,
    store_repo: Arc<S>,
    pool: PgPool,
}

impl<U, S> StoreService<U, S>
where
    U: UserRepository,
    S: StoreRepository,
{
    /// Create a new store service
    pub fn new(user_repo: Arc<U>, store_repo: Arc<S>, pool: PgPool) -> Self {
        Self {
            user_repo,
            store_repo,
            pool,
        }
    }

    /// Register a store for a partner. The store and its kiosk binding are
    /// created in the same transaction.
    #[instrument(skip(self, description))]
    pub async fn add_store(
        &self,
        owner_id: i64,
        name: String,
        description: String,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<(Store, Kiosk)> {
        let owner = self
            .user_repo
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(owner_id.to_string()))?;

        if !owner.role.is_partner() {
            return Err(AppError::PartnerNotEnrolled);
        }

        if !Store::is_valid_location(latitude, longitude) {
            return Err(AppError::InvalidInput(format!(
                "invalid coordinates: ({}, {})",
                latitude, longitude
            )));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin store transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        let store_row: StoreTxRow = sqlx::query_as(
            r#"
            INSERT INTO stores (owner_id, name, description, star, is_available, latitude, longitude)
            VALUES ($1, $2, $3, 0.0, TRUE, $4, $5)
            RETURNING id, owner_id, name, description, star, is_available,
                      latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(&name)
        .bind(&description)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating store: {}", e);
            AppError::Database(format!("Failed to create store: {}", e))
        })?;

        let kiosk_row: KioskTxRow = sqlx::query_as(
            r#"
            INSERT INTO kiosks (store_id)
            VALUES ($1)
            RETURNING id, store_id, created_at
            "#,
        )
        .bind(store_row.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!("Database error creating kiosk: {}", e);
            AppError::Database(format!("Failed to create kiosk: {}", e))
        })?;

        tx.commit().await.map_err(|e| {
            error!("Failed to commit store transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        info!(
            "Store {} registered for partner {} with kiosk {}",
            store_row.id, owner_id, kiosk_row.id
        );

        Ok((store_row.into(), kiosk_row.into()))
    }

    /// Update a store's profile. The rating is never written here; only
    /// review mutations touch it.
    #[instrument(skip(self, description))]
    pub async fn update_store(
        &self,
        owner_id: i64,
        store_id: i64,
        name: String,
        description: String,
        is_available: bool,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Store> {
        let mut store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or_else(|| AppError::StoreNotFound(store_id.to_string()))?;

        ensure_owner(owner_id, store.owner_id)?;

        if !Store::is_valid_location(latitude, longitude) {
            return Err(AppError::InvalidInput(format!(
                "invalid coordinates: ({}, {})",
                latitude, longitude
            )));
        }

        store.name = name;
        store.description = description;
        store.is_available = is_available;
        store.latitude = latitude;
        store.longitude = longitude;

        self.store_repo.update(&store).await
    }

    /// Delete a store and everything hanging off it. Reviews, reservations,
    /// the kiosk binding, and the store row go in one transaction.
    #[instrument(skip(self))]
    pub async fn delete_store(&self, owner_id: i64, store_id: i64) -> AppResult<()> {
        let store = self
            .store_repo
            .find_by_id(store_id)
            .await?
            .ok_or_else(|| AppError::StoreNotFound(store_id.to_string()))?;

        ensure_owner(owner_id, store.owner_id)?;

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to begin store transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        for (sql, what) in [
            ("DELETE FROM reviews WHERE store_id = $1", "reviews"),
            ("DELETE FROM reservations WHERE store_id = $1", "reservations"),
            ("DELETE FROM kiosks WHERE store_id = $1", "kiosks"),
            ("DELETE FROM stores WHERE id = $1", "store"),
        ] {
            sqlx::query(sql)
                .bind(store_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!("Database error deleting {} for store {}: {}", what, store_id, e);
                    AppError::Database(format!("Failed to delete {}: {}", what, e))
                })?;
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit store transaction: {}", e);
            AppError::Transaction(e.to_string())
        })?;

        info!("Store {} deleted by partner {}", store_id, owner_id);

        Ok(())
    }

    /// Fetch a single store
    #[instrument(skip(self))]
    pub async fn get_store(&self, id: i64) -> AppResult<Store> {
        self.store_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::StoreNotFound(id.to_string()))
    }

    /// List a partner's own stores
    #[instrument(skip(self))]
    pub async fn my_stores(&self, owner_id: i64) -> AppResult<Vec<Store>> {
        self.store_repo.find_by_owner(owner_id).await
    }

    /// Public store listing with a selectable sort order
    #[instrument(skip(self))]
    pub async fn list_stores(
        &self,
        sort: StoreSort,
        pagination: Pagination,
    ) -> AppResult<PaginatedResponse<Store>> {
        let (stores, total) = match sort {
            StoreSort::Name => {
                self.store_repo
                    .list_by_name(pagination.limit(), pagination.offset())
                    .await?
            }
            StoreSort::Star => {
                self.store_repo
                    .list_by_star(pagination.limit(), pagination.offset())
                    .await?
            }
        };

        Ok(PaginatedResponse {
            data: stores,
            pagination: PaginationMeta::new(total, pagination.page, pagination.per_page),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StoreTxRow {
    id: i64,
    owner_id: i64,
    name: String,
    description: String,
    star: f64,
    is_available: bool,
    latitude: f64,
    longitude: f64,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<StoreTxRow> for Store {
    fn from(row: StoreTxRow) -> Self {
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

#[derive(Debug, sqlx::FromRow)]
struct KioskTxRow {
    id: i64,
    store_id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<KioskTxRow> for Kiosk {
    fn from(row: KioskTxRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            created_at: row.created_at,
        }
    }
}
