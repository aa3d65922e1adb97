//! Partner enrollment handlers

use crate::dto::user::{PartnerEnrollRequest, UserResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;
use tabling_core::AppError;
use tabling_db::repositories::PgUserRepository;
use tabling_services::PartnerService;
use tracing::{debug, instrument};

/// Enroll a customer as a partner
///
/// POST /api/v1/partners
#[instrument(skip(pool, req))]
pub async fn enroll(
    pool: web::Data<PgPool>,
    req: web::Json<PartnerEnrollRequest>,
) -> Result<HttpResponse, AppError> {
    debug!(user_id = req.user_id, "Partner enrollment");

    let user = PartnerService::new(Arc::new(PgUserRepository::new(pool.get_ref().clone())))
        .enroll(req.user_id)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        UserResponse::from(user),
        "Enrolled as partner",
    )))
}

/// Configure partner routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/partners").route("", web::post().to(enroll)));
}
