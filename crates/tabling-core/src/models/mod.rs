//! Domain models for Tabling
//!
//! This module contains all the core domain models used throughout the application.

pub mod kiosk;
pub mod reservation;
pub mod review;
pub mod store;
pub mod user;

pub use kiosk::Kiosk;
pub use reservation::{ApproveStatus, Reservation};
pub use review::Review;
pub use store::Store;
pub use user::{User, UserRole};
