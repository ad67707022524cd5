use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::{
    model::{role::Role, user::event::CreateUserProfile},
    store::Principal,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{AccessTokenResponse, LoginRequest, RegisterRequest},
        user::UserResponse,
    },
};

// 認証プロバイダでアカウントを作成し、本人の権限で guest プロフィールを作る
pub async fn register(
    State(registry): State<AppRegistry>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccessTokenResponse>)> {
    req.validate(&())?;

    let uid = registry.identity_provider().sign_up(&req.credentials()).await?;
    let RegisterRequest {
        display_name,
        email,
        ..
    } = req;
    registry
        .user_repository()
        .create(
            &Principal::identity(uid.clone()),
            CreateUserProfile::new(uid.clone(), display_name, email, Role::Guest, None),
        )
        .await?;

    let access_token = registry.auth_repository().create_token(&uid).await?;
    tracing::info!(uid = %uid, "guest account registered");
    Ok((
        StatusCode::CREATED,
        Json(AccessTokenResponse {
            user_id: uid,
            access_token: access_token.0,
        }),
    ))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate(&())?;

    let uid = registry.identity_provider().sign_in(&req.into()).await?;
    let access_token = registry.auth_repository().create_token(&uid).await?;
    Ok(Json(AccessTokenResponse {
        user_id: uid,
        access_token: access_token.0,
    }))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(&user.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_current_user(user: AuthorizedUser) -> AppResult<Json<UserResponse>> {
    user.profile
        .map(UserResponse::from)
        .map(Json)
        .ok_or_else(|| AppError::EntityNotFound("profile not found".into()))
}
