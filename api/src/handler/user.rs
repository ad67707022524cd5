use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::{
    guard::RoleGuard,
    model::{
        id::UserId,
        user::event::{CreateUserProfile, DeleteUserProfile},
    },
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::user::{
        CreateUserRequest, UpdateUserRoleRequest, UpdateUserRoleRequestWithUserId, UserResponse,
        UsersResponse,
    },
};

pub async fn list_users(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<UsersResponse>> {
    user.require(&RoleGuard::ADMIN)?;

    registry
        .user_repository()
        .find_all(&user.principal())
        .await
        .map(UsersResponse::from)
        .map(Json)
}

pub async fn register_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    req.validate(&())?;
    // アカウントを作る前に権限を確認する
    user.require(&RoleGuard::ADMIN)?;

    let uid = registry.identity_provider().sign_up(&req.credentials()).await?;
    let CreateUserRequest {
        display_name,
        email,
        role,
        photo_url,
        ..
    } = req;
    let event = CreateUserProfile::new(uid.clone(), display_name, email, role, photo_url);
    registry
        .user_repository()
        .create(&user.principal(), event)
        .await?;

    let created = registry
        .user_repository()
        .find_by_id(&user.principal(), &uid)
        .await?;
    match created {
        Some(profile) => Ok((StatusCode::CREATED, Json(profile.into()))),
        None => Err(AppError::EntityNotFound("profile not found".into())),
    }
}

pub async fn change_role(
    user: AuthorizedUser,
    Path(uid): Path<UserId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateUserRoleRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    registry
        .user_repository()
        .update_role(
            &user.principal(),
            UpdateUserRoleRequestWithUserId::new(uid, req).into(),
        )
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_user(
    user: AuthorizedUser,
    Path(uid): Path<UserId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .user_repository()
        .delete(&user.principal(), DeleteUserProfile::new(uid))
        .await
        .map(|_| StatusCode::OK)
}
