//! User handlers
//!
//! Registration and lookup. Role changes go through the partner
//! enrollment endpoint, not here.

use crate::dto::user::{UserCreateRequest, UserResponse};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use tabling_core::models::User;
use tabling_core::traits::{Repository, UserRepository};
use tabling_core::AppError;
use tabling_db::repositories::PgUserRepository;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Register a user
///
/// POST /api/v1/users
#[instrument(skip(pool, req))]
pub async fn create_user(
    pool: web::Data<PgPool>,
    req: web::Json<UserCreateRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("User validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(email = %req.email, "Registering user");

    let repo = PgUserRepository::new(pool.get_ref().clone());

    if repo.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Email {} is already registered",
            req.email
        )));
    }

    let user = User::new(req.email.clone(), req.username.clone(), req.phone.clone());
    let created = repo.create(&user).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(UserResponse::from(created))))
}

/// Fetch a user
///
/// GET /api/v1/users/{id}
#[instrument(skip(pool))]
pub async fn get_user(
    pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let user = PgUserRepository::new(pool.get_ref().clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::UserNotFound(id.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserResponse::from(user))))
}

/// Configure user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user)),
    );
}
