use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::{
    model::{id::RoomId, room::event::DeleteRoom},
    store::Principal,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::room::{
        CreateRoomRequest, RoomListQuery, RoomResponse, RoomsResponse, UpdateRoomRequest,
        UpdateRoomRequestWithId,
    },
};

fn principal_of(user: &Option<AuthorizedUser>) -> Principal {
    user.as_ref()
        .map(AuthorizedUser::principal)
        .unwrap_or_else(Principal::anonymous)
}

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    req.validate(&())?;

    let room_id = registry
        .room_repository()
        .create(&user.principal(), req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": room_id }))))
}

pub async fn show_room_list(
    user: Option<AuthorizedUser>,
    Query(query): Query<RoomListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    let principal = principal_of(&user);
    let rooms = if query.available {
        registry.room_repository().find_available(&principal).await
    } else {
        registry.room_repository().find_all(&principal).await
    };
    rooms.map(RoomsResponse::from).map(Json)
}

pub async fn show_room(
    user: Option<AuthorizedUser>,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(&principal_of(&user), &room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound("room not found".into())),
        })
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_room = UpdateRoomRequestWithId::new(room_id, req);
    registry
        .room_repository()
        .update(&user.principal(), update_room.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .room_repository()
        .delete(&user.principal(), DeleteRoom { room_id })
        .await
        .map(|_| StatusCode::OK)
}
