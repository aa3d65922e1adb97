//! Reservation handlers
//!
//! Booking, the partner timetable, and confirm/decline.

use crate::dto::reservation::{
    DecisionRequest, ReservationCreateRequest, ReservationResponse, TimetableParams,
};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use tabling_core::config::ReservationConfig;
use tabling_core::AppError;
use tabling_db::repositories::{PgReservationRepository, PgStoreRepository, PgUserRepository};
use tabling_services::ReservationService;
use sqlx::PgPool;
use tracing::{debug, instrument, warn};
use validator::Validate;

type Service = ReservationService<PgUserRepository, PgStoreRepository, PgReservationRepository>;

fn service(pool: &PgPool, config: &ReservationConfig) -> Service {
    ReservationService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgStoreRepository::new(pool.clone())),
        Arc::new(PgReservationRepository::new(pool.clone())),
        config.visit_code_length,
    )
}

/// Book a slot at a store
///
/// POST /api/v1/reservations
#[instrument(skip(pool, config, req))]
pub async fn create_reservation(
    pool: web::Data<PgPool>,
    config: web::Data<ReservationConfig>,
    req: web::Json<ReservationCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Reservation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(
        customer_id = req.customer_id,
        store_id = req.store_id,
        "Booking reservation"
    );

    let reservation = service(pool.get_ref(), config.get_ref())
        .make_reservation(
            req.customer_id,
            req.store_id,
            req.contact_number.clone(),
            req.reserved_at,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(ReservationResponse::from(reservation))))
}

/// Fetch a reservation
///
/// GET /api/v1/reservations/{id}
#[instrument(skip(pool, config))]
pub async fn get_reservation(
    pool: web::Data<PgPool>,
    config: web::Data<ReservationConfig>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let reservation = service(pool.get_ref(), config.get_ref())
        .get_reservation(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReservationResponse::from(reservation))))
}

/// List a partner's reservations for one day across all their stores
///
/// GET /api/v1/reservations/timetable
#[instrument(skip(pool, config))]
pub async fn timetable(
    pool: web::Data<PgPool>,
    config: web::Data<ReservationConfig>,
    query: web::Query<TimetableParams>,
) -> Result<HttpResponse, AppError> {
    debug!(partner_id = query.partner_id, date = %query.date, "Listing timetable");

    let reservations = service(pool.get_ref(), config.get_ref())
        .timetable(query.partner_id, query.date)
        .await?;

    let data: Vec<ReservationResponse> = reservations.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

/// Approve a requested reservation
///
/// POST /api/v1/reservations/{id}/confirm
#[instrument(skip(pool, config, req))]
pub async fn confirm(
    pool: web::Data<PgPool>,
    config: web::Data<ReservationConfig>,
    path: web::Path<i64>,
    req: web::Json<DecisionRequest>,
) -> Result<HttpResponse, AppError> {
    let reservation = service(pool.get_ref(), config.get_ref())
        .confirm(req.partner_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReservationResponse::from(reservation))))
}

/// Decline a requested reservation
///
/// POST /api/v1/reservations/{id}/decline
#[instrument(skip(pool, config, req))]
pub async fn decline(
    pool: web::Data<PgPool>,
    config: web::Data<ReservationConfig>,
    path: web::Path<i64>,
    req: web::Json<DecisionRequest>,
) -> Result<HttpResponse, AppError> {
    let reservation = service(pool.get_ref(), config.get_ref())
        .decline(req.partner_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReservationResponse::from(reservation))))
}

/// Configure reservation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reservations")
            .route("", web::post().to(create_reservation))
            .route("/timetable", web::get().to(timetable))
            .route("/{id}", web::get().to(get_reservation))
            .route("/{id}/confirm", web::post().to(confirm))
            .route("/{id}/decline", web::post().to(decline)),
    );
}
