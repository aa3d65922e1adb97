//! API layer for Tabling
//!
//! HTTP handlers and DTOs for reservations, kiosk check-in, reviews,
//! stores, and partner enrollment.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;

// Re-export DTOs (common types)
pub use dto::{ApiResponse, PaginationParams};

// Re-export handler configuration functions
pub use handlers::{
    configure_kiosks, configure_partners, configure_reservations, configure_reviews,
    configure_stores, configure_users,
};
