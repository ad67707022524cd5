use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use kernel::{
    guard::{Access, ProfileState, RoleGuard},
    model::{auth::AccessToken, id::UserId, user::UserProfile},
    store::Principal,
};
use registry::AppRegistry;
use shared::error::AppError;

/// Signed-in caller resolved from `Authorization: Bearer <token>`.
/// `profile` is `None` until the caller has a profile document.
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub uid: UserId,
    pub profile: Option<UserProfile>,
}

impl AuthorizedUser {
    pub fn id(&self) -> &UserId {
        &self.uid
    }

    pub fn principal(&self) -> Principal {
        match &self.profile {
            Some(profile) => Principal::from(profile),
            None => Principal::identity(self.uid.clone()),
        }
    }

    pub fn require(&self, guard: &RoleGuard) -> Result<&UserProfile, AppError> {
        let state = ProfileState::Resolved(self.profile.clone());
        match guard.check(&state) {
            Access::Granted(_) => self.profile.as_ref().ok_or(AppError::ForbiddenOperation),
            Access::Loading | Access::Denied => Err(AppError::ForbiddenOperation),
        }
    }
}

pub(crate) fn bearer_token(parts: &Parts) -> Option<AccessToken> {
    let value = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| AccessToken::new(token.to_string()))
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        let access_token = bearer_token(parts).ok_or(AppError::UnauthenticatedError)?;
        let uid = registry
            .auth_repository()
            .fetch_user_id_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        // プロフィールの読み取りは本人として行う
        let profile = registry
            .user_repository()
            .find_by_id(&Principal::identity(uid.clone()), &uid)
            .await?;

        Ok(Self {
            access_token,
            uid,
            profile,
        })
    }
}
