//! User repository implementation
//!
//! Provides PostgreSQL-backed storage for users. Partner enrollment is a
//! conditional role flip so that a double enrollment surfaces as a conflict.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use tabling_core::{
    models::{User, UserRole},
    traits::{Repository, UserRepository},
    AppError, AppResult,
};

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Parse user role from string
    fn parse_role(s: &str) -> UserRole {
        UserRole::from_str(s).unwrap_or(UserRole::Customer)
    }
}

const USER_COLUMNS: &str = r#"
    id, email, username, phone, user_role, created_at, updated_at
"#;

#[async_trait]
impl Repository<User, i64> for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding user {}: {}", id, e);
            AppError::Database(format!("Failed to find user: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, limit: i64, offset: i64) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<sqlx::Postgres, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT $1 OFFSET $2",
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding users: {}", e);
            AppError::Database(format!("Failed to fetch users: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> AppResult<i64> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting users: {}", e);
                AppError::Database(format!("Failed to count users: {}", e))
            })?;

        Ok(result.0)
    }

    #[instrument(skip(self, entity))]
    async fn create(&self, entity: &User) -> AppResult<User> {
        debug!("Creating user: {}", entity.email);

        let row = sqlx::query_as::<sqlx::Postgres, UserRow>(&format!(
            r#"
            INSERT INTO users (email, username, phone, user_role)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&entity.email)
        .bind(&entity.username)
        .bind(&entity.phone)
        .bind(entity.role.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error creating user: {}", e);
            AppError::Database(format!("Failed to create user: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self, entity))]
    async fn update(&self, entity: &User) -> AppResult<User> {
        debug!("Updating user: {}", entity.id);

        let row = sqlx::query_as::<sqlx::Postgres, UserRow>(&format!(
            r#"
            UPDATE users
            SET email = $2,
                username = $3,
                phone = $4,
                user_role = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(entity.id)
        .bind(&entity.email)
        .bind(&entity.username)
        .bind(&entity.phone)
        .bind(entity.role.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating user {}: {}", entity.id, e);
            AppError::Database(format!("Failed to update user: {}", e))
        })?;

        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> AppResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error deleting user {}: {}", id, e);
                AppError::Database(format!("Failed to delete user: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        debug!("Finding user by email");

        let result = sqlx::query_as::<sqlx::Postgres, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding user by email: {}", e);
            AppError::Database(format!("Failed to find user: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn promote_to_partner(&self, id: i64) -> AppResult<bool> {
        debug!("Promoting user {} to partner", id);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_role = 'partner',
                updated_at = NOW()
            WHERE id = $1 AND user_role = 'customer'
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error promoting user {}: {}", id, e);
            AppError::Database(format!("Failed to promote user: {}", e))
        })?;

        Ok(result.rows_affected() > 0)
    }
}

/// Helper struct for mapping database rows
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    phone: Option<String>,
    user_role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            username: row.username,
            phone: row.phone,
            role: PgUserRepository::parse_role(&row.user_role),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(PgUserRepository::parse_role("customer"), UserRole::Customer);
        assert_eq!(PgUserRepository::parse_role("partner"), UserRole::Partner);
        assert_eq!(PgUserRepository::parse_role("unknown"), UserRole::Customer);
    }
}
