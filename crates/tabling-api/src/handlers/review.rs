//! Review handlers
//!
//! Review lifecycle endpoints. Every mutation goes through the review
//! service so the store rating refresh shares the transaction.

use crate::dto::review::{ActorParams, ReviewCreateRequest, ReviewResponse, ReviewUpdateRequest};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;
use tabling_core::AppError;
use tabling_db::repositories::{PgReservationRepository, PgReviewRepository};
use tabling_services::ReviewService;
use tracing::{debug, instrument, warn};
use validator::Validate;

type Service = ReviewService<PgReservationRepository, PgReviewRepository>;

fn service(pool: &PgPool) -> Service {
    ReviewService::new(
        Arc::new(PgReservationRepository::new(pool.clone())),
        Arc::new(PgReviewRepository::new(pool.clone())),
        pool.clone(),
    )
}

/// Write a review for a visited reservation
///
/// POST /api/v1/reviews
#[instrument(skip(pool, req))]
pub async fn create_review(
    pool: web::Data<PgPool>,
    req: web::Json<ReviewCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Review validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(
        customer_id = req.customer_id,
        reservation_id = req.reservation_id,
        "Creating review"
    );

    let review = service(pool.get_ref())
        .create_review(
            req.customer_id,
            req.reservation_id,
            req.star,
            req.content.clone(),
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(ReviewResponse::from(review))))
}

/// Fetch a review
///
/// GET /api/v1/reviews/{id}
#[instrument(skip(pool))]
pub async fn get_review(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let review = service(pool.get_ref()).get_review(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReviewResponse::from(review))))
}

/// Update a review's star or content
///
/// PUT /api/v1/reviews/{id}
#[instrument(skip(pool, req))]
pub async fn update_review(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    req: web::Json<ReviewUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Review validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let review = service(pool.get_ref())
        .update_review(
            req.customer_id,
            path.into_inner(),
            req.star,
            req.content.clone(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReviewResponse::from(review))))
}

/// Delete a review
///
/// DELETE /api/v1/reviews/{id}
#[instrument(skip(pool))]
pub async fn delete_review(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    query: web::Query<ActorParams>,
) -> Result<HttpResponse, AppError> {
    service(pool.get_ref())
        .delete_review(query.customer_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reviews")
            .route("", web::post().to(create_review))
            .route("/{id}", web::get().to(get_review))
            .route("/{id}", web::put().to(update_review))
            .route("/{id}", web::delete().to(delete_review)),
    );
}
