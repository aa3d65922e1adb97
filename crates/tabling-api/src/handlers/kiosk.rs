//! Kiosk handlers
//!
//! The in-store check-in endpoint. The kiosk identifies itself by id in
//! the path; the customer presents their reservation id, contact number,
//! and visit code.

use crate::dto::reservation::{CheckInRequest, CheckInResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;
use tabling_core::config::ReservationConfig;
use tabling_core::AppError;
use tabling_db::repositories::{PgKioskRepository, PgReservationRepository, PgUserRepository};
use tabling_services::CheckInService;
use tracing::{debug, instrument, warn};
use validator::Validate;

type Service = CheckInService<PgKioskRepository, PgReservationRepository, PgUserRepository>;

fn service(pool: &PgPool, config: &ReservationConfig) -> Service {
    CheckInService::new(
        Arc::new(PgKioskRepository::new(pool.clone())),
        Arc::new(PgReservationRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool.clone())),
        config.visit_window_minutes,
    )
}

/// Check a customer in at a kiosk
///
/// POST /api/v1/kiosks/{id}/check-in
#[instrument(skip(pool, config, req))]
pub async fn check_in(
    pool: web::Data<PgPool>,
    config: web::Data<ReservationConfig>,
    path: web::Path<i64>,
    req: web::Json<CheckInRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Check-in validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let kiosk_id = path.into_inner();
    debug!(kiosk_id, reservation_id = req.reservation_id, "Check-in attempt");

    let username = service(pool.get_ref(), config.get_ref())
        .check_in(kiosk_id, req.reservation_id, &req.contact_number, &req.code)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        CheckInResponse { username },
        "Enjoy your visit",
    )))
}

/// Configure kiosk routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/kiosks").route("/{id}/check-in", web::post().to(check_in)),
    );
}
