//! Partner enrollment service
//!
//! Enrollment flips a customer's role to partner. The flip is conditional
//! on the current role, so submitting the form twice reports a conflict
//! instead of silently succeeding.

use std::sync::Arc;
use tracing::{info, instrument};

use tabling_core::{
    models::User,
    traits::UserRepository,
    AppError, AppResult,
};

/// Service for turning customers into store-owning partners
pub struct PartnerService<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> PartnerService<U>
where
    U: UserRepository,
{
    /// Create a new partner service
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Enroll a customer as a partner and return the updated user
    #[instrument(skip(self))]
    pub async fn enroll(&self, user_id: i64) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))?;

        if !self.user_repo.promote_to_partner(user_id).await? {
            return Err(AppError::PartnerAlreadyEnrolled);
        }

        info!("User {} enrolled as partner", user_id);

        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound(user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::*;

    #[tokio::test]
    async fn test_enroll() {
        let svc = PartnerService::new(Arc::new(MemUserRepository::with(vec![customer(
            1, "alice",
        )])));

        let user = svc.enroll(1).await.unwrap();
        assert!(user.role.is_partner());
    }

    #[tokio::test]
    async fn test_enroll_twice_conflicts() {
        let svc = PartnerService::new(Arc::new(MemUserRepository::with(vec![customer(
            1, "alice",
        )])));

        svc.enroll(1).await.unwrap();
        let err = svc.enroll(1).await.unwrap_err();
        assert!(matches!(err, AppError::PartnerAlreadyEnrolled));
    }

    #[tokio::test]
    async fn test_enroll_unknown_user() {
        let svc = PartnerService::new(Arc::new(MemUserRepository::default()));

        let err = svc.enroll(9).await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }
}
