use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::{
    guard::RoleGuard,
    model::{id::ReservationId, reservation::event::DeleteReservation},
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::reservation::{
        CreateReservationRequest, ReservationListQuery, ReservationResponse,
        ReservationsResponse, UpdateReservationRequest, UpdateReservationRequestWithId,
        UpdateReservationStatusRequest, UpdateReservationStatusRequestWithId,
    },
};

// 書き込みの権限判定はストアのアクセスルールに任せ、拒否は 403 とエラーチャネルへの通知になる

pub async fn register_reservation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    req.validate(&())?;

    let reservation_id = registry
        .reservation_repository()
        .create(&user.principal(), req.into())
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": reservation_id })),
    ))
}

pub async fn show_reservation_list(
    user: AuthorizedUser,
    Query(query): Query<ReservationListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationsResponse>> {
    user.require(&RoleGuard::FRONT_DESK)?;

    let principal = user.principal();
    let reservations = match query.room_id {
        Some(room_id) => {
            registry
                .reservation_repository()
                .find_by_room_id(&principal, &room_id)
                .await
        }
        None => registry.reservation_repository().find_all(&principal).await,
    };
    reservations.map(ReservationsResponse::from).map(Json)
}

pub async fn show_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReservationResponse>> {
    user.require(&RoleGuard::FRONT_DESK)?;

    registry
        .reservation_repository()
        .find_by_id(&user.principal(), &reservation_id)
        .await
        .and_then(|reservation| match reservation {
            Some(reservation) => Ok(Json(reservation.into())),
            None => Err(AppError::EntityNotFound("reservation not found".into())),
        })
}

pub async fn update_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_reservation = UpdateReservationRequestWithId::new(reservation_id, req);
    registry
        .reservation_repository()
        .update(&user.principal(), update_reservation.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn update_reservation_status(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateReservationStatusRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;
    let update_status = UpdateReservationStatusRequestWithId::new(reservation_id, req);
    registry
        .reservation_repository()
        .update_status(&user.principal(), update_status.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_reservation(
    user: AuthorizedUser,
    Path(reservation_id): Path<ReservationId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .reservation_repository()
        .delete(&user.principal(), DeleteReservation::new(reservation_id))
        .await
        .map(|_| StatusCode::OK)
}
