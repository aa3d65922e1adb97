//! Repository implementations
//!
//! This module contains concrete implementations of all repository traits
//! defined in tabling-core, using sqlx for PostgreSQL access.

pub mod kiosk_repo;
pub mod reservation_repo;
pub mod review_repo;
pub mod store_repo;
pub mod user_repo;

pub use kiosk_repo::PgKioskRepository;
pub use reservation_repo::PgReservationRepository;
pub use review_repo::PgReviewRepository;
pub use store_repo::PgStoreRepository;
pub use user_repo::PgUserRepository;
