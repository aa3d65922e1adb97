//! Reservation repository implementation
//!
//! Provides PostgreSQL-backed storage for reservations. The race-sensitive
//! transitions (decide, check-in, review flag) are conditional updates so
//! that concurrent attempts resolve to exactly one winner.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use tabling_core::{
    models::{ApproveStatus, Reservation},
    traits::{Repository, ReservationRepository},
    AppError, AppResult,
};

/// PostgreSQL implementation of ReservationRepository
pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    /// Create a new reservation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse approve status from string
    fn parse_status(s: &str) -> ApproveStatus {
        ApproveStatus::from_str(s).unwrap_or(ApproveStatus::Requested)
    }
}

const RESERVATION_COLUMNS: &str = r#"
    id, store_id, customer_id, contact_number, code,
    reserved_at, approve_status, visited, reviewed,
    created_at, updated_at
"#;

#[async_trait]
impl Repository<Reservation, i64> for PgReservationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Reservation>> {
        debug!("Finding reservation by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, ReservationRow>(&format!(
            "SELECT {} FROM reservations WHERE id = $1",
            RESERVATION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding reservation {}: {}", id, e);
            AppError::Database(format!("Failed to find reservation: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<sqlx::Postgres, ReservationRow>(&format!(
            "SELECT {} FROM reservations ORDER BY reserved_at DESC LIMIT $1 OFFSET $2",
            RESERVATION_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding reservations: {}", e);
            AppError::Database(format!("Failed to fetch reservations: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting reservations: {}", e);
                AppError::Database(format!("Failed to count reservations: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &Reservation) -> AppResult<Reservation> {
        debug!(
            "Creating reservation for customer {} at store {}",
            entity.customer_id, entity.store_id
        );

        let row = sqlx::query_as::<sqlx::Postgres, ReservationRow>(&format!(
            r#"
            INSERT INTO reservations (
                store_id, customer_id, contact_number, code,
                reserved_at, approve_status, visited, reviewed
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(entity.store_id)
        .bind(entity.customer_id)
        .bind(&entity.contact_number)
        .bind(&entity.code)
        .bind(entity.reserved_at)
        .bind(entity.approve_status.to_string())
        .bind(entity.visited)
        .bind(entity.reviewed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating reservation: {}", e);
            AppError::Database(format!("Failed to create reservation: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &Reservation) -> AppResult<Reservation> {
        debug!("Updating reservation: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, ReservationRow>(&format!(
            r#"
            UPDATE reservations
            SET contact_number = $2,
                reserved_at = $3,
                approve_status = $4,
                visited = $5,
                reviewed = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(entity.id)
        .bind(&entity.contact_number)
        .bind(entity.reserved_at)
        .bind(entity.approve_status.to_string())
        .bind(entity.visited)
        .bind(entity.reviewed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating reservation {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update reservation: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<bool> {
        debug!("Deleting reservation: {}", id);

        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting reservation {}: {}", id, e);
                AppError::Database(format!("Failed to delete reservation: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    #[instrument(skip(self))]
    async fn find_for_partner_on(
        &self,
        partner_id: i64,
        date: NaiveDate,
    ) -> AppResult<Vec<Reservation>> {
        debug!(
            "Finding reservations for partner {} on {}",
            partner_id, date
        );

        let rows = sqlx::query_as::<sqlx::Postgres, ReservationRow>(
            r#"
            SELECT
                r.id, r.store_id, r.customer_id, r.contact_number, r.code,
                r.reserved_at, r.approve_status, r.visited, r.reviewed,
                r.created_at, r.updated_at
            FROM reservations r
            JOIN stores s ON s.id = r.store_id
            WHERE s.owner_id = $1
                AND r.reserved_at >= $2
                AND r.reserved_at < $2 + INTERVAL '1 day'
            ORDER BY r.reserved_at ASC
            "#,
        )
        .bind(partner_id)
        .bind(date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding partner reservations: {}", e);
            AppError::Database(format!("Failed to fetch partner reservations: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn decide(&self, id: i64, decision: ApproveStatus) -> AppResult<Option<Reservation>> {
        debug!("Deciding reservation {} as {}", id, decision);

        let row = sqlx::query_as::<sqlx::Postgres, ReservationRow>(&format!(
            r#"
            UPDATE reservations
            SET approve_status = $2,
                updated_at = NOW()
            WHERE id = $1 AND approve_status = 'requested'
            RETURNING {}
            "#,
            RESERVATION_COLUMNS
        ))
        .bind(id)
        .bind(decision.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error deciding reservation {}: {}", id, e);
            AppError::Database(format!("Failed to decide reservation: {}", e))
        })?;

        Ok(row.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn mark_visited(&self, id: i64) -> AppResult<bool> {
        debug!("Marking reservation {} visited", id);

        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET visited = TRUE,
                updated_at = NOW()
            WHERE id = $1 AND visited = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error marking reservation visited: {}", e);
            AppError::Database(format!("Failed to mark reservation visited: {}", e))
        })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_reviewed(&self, id: i64) -> AppResult<bool> {
        debug!("Marking reservation {} reviewed", id);

        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET reviewed = TRUE,
                updated_at = NOW()
            WHERE id = $1 AND reviewed = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error marking reservation reviewed: {}", e);
            AppError::Database(format!("Failed to mark reservation reviewed: {}", e))
        })?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_all_by_store(&self, store_id: i64) -> AppResult<i64> {
        debug!("Deleting reservations for store {}", store_id);

        let result = sqlx::query("DELETE FROM reservations WHERE store_id = $1")
            .bind(store_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting store reservations: {}", e);
                AppError::Database(format!("Failed to delete store reservations: {}", e))
            })?;

        Ok(result.rows_affected() as i64)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct ReservationRow {
    id: i64,
    store_id: i64,
    customer_id: i64,
    contact_number: String,
    code: String,
    reserved_at: DateTime<Utc>,
    approve_status: String,
    visited: bool,
    reviewed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: row.id,
            store_id: row.store_id,
            customer_id: row.customer_id,
            contact_number: row.contact_number,
            code: row.code,
            reserved_at: row.reserved_at,
            approve_status: PgReservationRepository::parse_status(&row.approve_status),
            visited: row.visited,
            reviewed: row.reviewed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(
            PgReservationRepository::parse_status("requested"),
            ApproveStatus::Requested
        );
        assert_eq!(
            PgReservationRepository::parse_status("approved"),
            ApproveStatus::Approved
        );
        assert_eq!(
            PgReservationRepository::parse_status("declined"),
            ApproveStatus::Declined
        );
        // unknown strings fall back to the initial state
        assert_eq!(
            PgReservationRepository::parse_status("garbage"),
            ApproveStatus::Requested
        );
    }
}
