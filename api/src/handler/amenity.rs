use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use garde::Validate;
use kernel::{
    model::{
        amenity::{event::DeleteAmenity, AmenityKind},
        id::AmenityId,
    },
    store::Principal,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::amenity::{
        AmenitiesResponse, AmenityResponse, CreateAmenityRequest, UpdateAmenityRequest,
    },
};

// 種別（プール・レストラン/バー・会議室）はルーターの Extension で受け取る

pub async fn register_amenity(
    user: AuthorizedUser,
    Extension(kind): Extension<AmenityKind>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateAmenityRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    req.validate(&())?;

    let amenity_id = registry
        .amenity_repository()
        .create(&user.principal(), req.into_event(kind))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": amenity_id })),
    ))
}

pub async fn show_amenity_list(
    user: Option<AuthorizedUser>,
    Extension(kind): Extension<AmenityKind>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AmenitiesResponse>> {
    let principal = user
        .as_ref()
        .map(AuthorizedUser::principal)
        .unwrap_or_else(Principal::anonymous);
    registry
        .amenity_repository()
        .find_all(&principal, kind)
        .await
        .map(AmenitiesResponse::from)
        .map(Json)
}

pub async fn show_amenity(
    user: Option<AuthorizedUser>,
    Extension(kind): Extension<AmenityKind>,
    Path(amenity_id): Path<AmenityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AmenityResponse>> {
    let principal = user
        .as_ref()
        .map(AuthorizedUser::principal)
        .unwrap_or_else(Principal::anonymous);
    registry
        .amenity_repository()
        .find_by_id(&principal, kind, &amenity_id)
        .await
        .and_then(|amenity| match amenity {
            Some(amenity) => Ok(Json(amenity.into())),
            None => Err(AppError::EntityNotFound(format!("{kind} not found"))),
        })
}

pub async fn update_amenity(
    user: AuthorizedUser,
    Extension(kind): Extension<AmenityKind>,
    Path(amenity_id): Path<AmenityId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateAmenityRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    registry
        .amenity_repository()
        .update(&user.principal(), req.into_event(kind, amenity_id))
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_amenity(
    user: AuthorizedUser,
    Extension(kind): Extension<AmenityKind>,
    Path(amenity_id): Path<AmenityId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .amenity_repository()
        .delete(&user.principal(), DeleteAmenity { kind, amenity_id })
        .await
        .map(|_| StatusCode::OK)
}
