//! HTTP handlers
//!
//! One module per resource, each exposing a `configure` function that
//! mounts its routes on a service config.

pub mod kiosk;
pub mod partner;
pub mod reservation;
pub mod review;
pub mod store;
pub mod user;

pub use kiosk::configure as configure_kiosks;
pub use partner::configure as configure_partners;
pub use reservation::configure as configure_reservations;
pub use review::configure as configure_reviews;
pub use store::configure as configure_stores;
pub use user::configure as configure_users;
