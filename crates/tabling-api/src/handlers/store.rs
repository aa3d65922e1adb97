//! Store handlers
//!
//! Public store discovery plus partner-side store management. The public
//! listing supports name and rating sort orders; a store's reviews hang
//! off its resource path.

use crate::dto::review::ReviewResponse;
use crate::dto::store::{
    OwnerParams, StoreCreateRequest, StoreCreatedResponse, StoreListParams, StoreResponse,
    StoreUpdateRequest,
};
use crate::dto::{ApiResponse, PaginationParams};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use std::sync::Arc;
use tabling_core::traits::{PaginatedResponse, PaginationMeta};
use tabling_core::AppError;
use tabling_db::repositories::{
    PgReservationRepository, PgReviewRepository, PgStoreRepository, PgUserRepository,
};
use tabling_services::{store::StoreSort, ReviewService, StoreService};
use tracing::{debug, instrument, warn};
use validator::Validate;

type Service = StoreService<PgUserRepository, PgStoreRepository>;

fn service(pool: &PgPool) -> Service {
    StoreService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgStoreRepository::new(pool.clone())),
        pool.clone(),
    )
}

/// Register a store and its kiosk
///
/// POST /api/v1/stores
#[instrument(skip(pool, req))]
pub async fn create_store(
    pool: web::Data<PgPool>,
    req: web::Json<StoreCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Store validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(owner_id = req.owner_id, name = %req.name, "Registering store");

    let (store, kiosk) = service(pool.get_ref())
        .add_store(
            req.owner_id,
            req.name.clone(),
            req.description.clone(),
            req.latitude,
            req.longitude,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(StoreCreatedResponse {
        store: store.into(),
        kiosk: kiosk.into(),
    })))
}

/// Public store listing, sorted by name or rating
///
/// GET /api/v1/stores?sort=star
#[instrument(skip(pool))]
pub async fn list_stores(
    pool: web::Data<PgPool>,
    query: web::Query<PaginationParams>,
    params: web::Query<StoreListParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let sort = params
        .sort
        .as_deref()
        .map(StoreSort::from_str)
        .unwrap_or_default();

    let page = service(pool.get_ref())
        .list_stores(sort, query.to_pagination())
        .await?;

    let data: Vec<StoreResponse> = page.data.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(PaginatedResponse {
        data,
        pagination: page.pagination,
    }))
}

/// List the acting partner's own stores
///
/// GET /api/v1/stores/mine
#[instrument(skip(pool))]
pub async fn my_stores(
    pool: web::Data<PgPool>,
    query: web::Query<OwnerParams>,
) -> Result<HttpResponse, AppError> {
    let stores = service(pool.get_ref()).my_stores(query.owner_id).await?;

    let data: Vec<StoreResponse> = stores.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

/// Fetch a store
///
/// GET /api/v1/stores/{id}
#[instrument(skip(pool))]
pub async fn get_store(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let store = service(pool.get_ref()).get_store(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(StoreResponse::from(store))))
}

/// Update a store's profile
///
/// PUT /api/v1/stores/{id}
#[instrument(skip(pool, req))]
pub async fn update_store(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    req: web::Json<StoreUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Store validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let store = service(pool.get_ref())
        .update_store(
            req.owner_id,
            path.into_inner(),
            req.name.clone(),
            req.description.clone(),
            req.is_available,
            req.latitude,
            req.longitude,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(StoreResponse::from(store))))
}

/// Delete a store and everything hanging off it
///
/// DELETE /api/v1/stores/{id}
#[instrument(skip(pool))]
pub async fn delete_store(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    query: web::Query<OwnerParams>,
) -> Result<HttpResponse, AppError> {
    service(pool.get_ref())
        .delete_store(query.owner_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// List a store's reviews, newest first
///
/// GET /api/v1/stores/{id}/reviews
#[instrument(skip(pool))]
pub async fn list_store_reviews(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Pagination validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let reviews = ReviewService::new(
        Arc::new(PgReservationRepository::new(pool.get_ref().clone())),
        Arc::new(PgReviewRepository::new(pool.get_ref().clone())),
        pool.get_ref().clone(),
    )
    .list_store_reviews(path.into_inner(), query.to_pagination())
    .await?;

    let data: Vec<ReviewResponse> = reviews.data.into_iter().map(Into::into).collect();
    let pagination: PaginationMeta = reviews.pagination;

    Ok(HttpResponse::Ok().json(PaginatedResponse { data, pagination }))
}

/// Configure store routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stores")
            .route("", web::get().to(list_stores))
            .route("", web::post().to(create_store))
            .route("/mine", web::get().to(my_stores))
            .route("/{id}", web::get().to(get_store))
            .route("/{id}", web::put().to(update_store))
            .route("/{id}", web::delete().to(delete_store))
            .route("/{id}/reviews", web::get().to(list_store_reviews)),
    );
}
