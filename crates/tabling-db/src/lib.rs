//! Tabling Database Layer
//!
//! This crate provides PostgreSQL database access and repository implementations
//! for the Tabling reservation system. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for all domain entities
//! - Conditional-update state flips for race-sensitive transitions
//! - Transaction support for atomic operations

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use sqlx::{PgPool, Postgres, Transaction};
pub use tabling_core::{AppError, AppResult};
