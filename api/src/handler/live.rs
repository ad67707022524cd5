//! WebSocket views over live bindings. Each connection owns its bindings;
//! closing the socket drops them and ends the underlying subscriptions.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
};
use kernel::{
    binding::{BindingState, CollectionBinding, DocBinding},
    guard::{Access, ProfileState, RoleGuard},
    model::{
        auth::AccessToken,
        id::{RoomId, UserId},
        reservation::Reservation,
        room::Room,
        user::UserProfile,
    },
    store::{Collection, DocumentPath, Principal, Query as DocumentQuery},
};
use registry::AppRegistry;
use serde::Serialize;
use shared::error::{AppError, AppResult};
use tokio::sync::watch;

use crate::model::live::{LiveFrame, LiveTokenQuery};

pub async fn live_rooms(ws: WebSocketUpgrade, State(registry): State<AppRegistry>) -> Response {
    ws.on_upgrade(move |socket| async move {
        let mut binding = CollectionBinding::<Room>::new(
            registry.document_store(),
            registry.error_channel(),
            Principal::anonymous(),
        );
        let rx = binding.watch();
        binding.bind(Some(DocumentQuery::collection(Collection::Rooms)));
        pump(socket, rx).await;
    })
}

pub async fn live_room(
    ws: WebSocketUpgrade,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> Response {
    ws.on_upgrade(move |socket| async move {
        let mut binding = DocBinding::<Room>::new(
            registry.document_store(),
            registry.error_channel(),
            Principal::anonymous(),
        );
        let rx = binding.watch();
        binding.bind(Some(DocumentPath::new(Collection::Rooms, room_id.as_str())));
        pump(socket, rx).await;
    })
}

// ブラウザの WebSocket はヘッダーを付けられないため、トークンはクエリで受け取る
pub async fn live_reservations(
    ws: WebSocketUpgrade,
    Query(query): Query<LiveTokenQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Response> {
    let token = query
        .token
        .filter(|t| !t.is_empty())
        .ok_or(AppError::UnauthenticatedError)?;
    let uid = registry
        .auth_repository()
        .fetch_user_id_from_token(&AccessToken::new(token))
        .await?
        .ok_or(AppError::UnauthenticatedError)?;

    Ok(ws
        .on_upgrade(move |socket| front_desk_feed(socket, registry, uid))
        .into_response())
}

fn profile_state(state: &BindingState<UserProfile>) -> ProfileState {
    if state.loading {
        ProfileState::Loading
    } else {
        ProfileState::Resolved(state.data.clone())
    }
}

async fn front_desk_feed(mut socket: WebSocket, registry: AppRegistry, uid: UserId) {
    let mut profile = DocBinding::<UserProfile>::new(
        registry.document_store(),
        registry.error_channel(),
        Principal::identity(uid.clone()),
    );
    let mut profile_rx = profile.watch();
    profile.bind(Some(DocumentPath::new(Collection::Users, uid.as_str())));

    // プロフィールが解決するまでは Loading を返し、許可も拒否もしない
    if send(&mut socket, &LiveFrame::<Vec<Reservation>>::Loading).await.is_err() {
        return;
    }
    let resolved = loop {
        let state = profile_state(&profile_rx.borrow_and_update());
        match state {
            ProfileState::Loading => {
                if profile_rx.changed().await.is_err() {
                    return;
                }
            }
            resolved => break resolved,
        }
    };

    let principal = match RoleGuard::FRONT_DESK.check(&resolved) {
        Access::Granted(p) => Principal::from(p),
        Access::Loading | Access::Denied => {
            tracing::debug!(uid = %uid, "live reservations refused");
            let _ = send(&mut socket, &LiveFrame::<Vec<Reservation>>::Unauthorized).await;
            let _ = socket.send(Message::Close(None)).await;
            return;
        }
    };

    let mut reservations = CollectionBinding::<Reservation>::new(
        registry.document_store(),
        registry.error_channel(),
        principal,
    );
    let rx = reservations.watch();
    reservations.bind(Some(DocumentQuery::collection(Collection::Reservations)));
    pump(socket, rx).await;
}

async fn send<T: Serialize>(socket: &mut WebSocket, frame: &LiveFrame<T>) -> Result<(), ()> {
    let text = serde_json::to_string(frame).map_err(|e| {
        tracing::warn!(error = %e, "failed to encode live frame");
    })?;
    socket.send(Message::Text(text)).await.map_err(|_| ())
}

// バインディングの状態が変わるたびに全体を送る。クライアントが閉じたら終了する
async fn pump<T: Serialize + Clone>(mut socket: WebSocket, mut rx: watch::Receiver<BindingState<T>>) {
    loop {
        let frame = LiveFrame::from(&*rx.borrow_and_update());
        if send(&mut socket, &frame).await.is_err() {
            return;
        }
        loop {
            tokio::select! {
                changed = rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
                incoming = socket.recv() => match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => {
                        tracing::debug!("live view client disconnected");
                        return;
                    }
                    Some(Ok(_)) => continue,
                },
            }
        }
    }
}
