//! Data transfer objects
//!
//! Request and response types for the HTTP API, grouped by resource.

pub mod common;
pub mod reservation;
pub mod review;
pub mod store;
pub mod user;

pub use common::{ApiResponse, PaginationParams};
