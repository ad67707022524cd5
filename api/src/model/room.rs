use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::RoomId,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room, RoomCategory, RoomStatus,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub category: RoomCategory,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(length(min = 1), inner(url))]
    pub images: Vec<String>,
    #[garde(skip)]
    #[serde(default = "default_status")]
    pub status: RoomStatus,
}

fn default_status() -> RoomStatus {
    RoomStatus::Available
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            name,
            category,
            price,
            description,
            images,
            status,
        } = value;
        CreateRoom {
            name,
            category,
            price,
            description,
            images,
            status,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(length(min = 1))]
    pub name: Option<String>,
    #[garde(skip)]
    pub category: Option<RoomCategory>,
    #[garde(range(min = 0.0))]
    pub price: Option<f64>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(length(min = 1), inner(url)))]
    pub images: Option<Vec<String>>,
    #[garde(skip)]
    pub status: Option<RoomStatus>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithId(RoomId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithId> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithId) -> Self {
        let UpdateRoomRequestWithId(
            room_id,
            UpdateRoomRequest {
                name,
                category,
                price,
                description,
                images,
                status,
            },
        ) = value;
        UpdateRoom {
            room_id,
            name,
            category,
            price,
            description,
            images,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub name: String,
    pub category: RoomCategory,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub status: RoomStatus,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            id,
            name,
            category,
            price,
            description,
            images,
            status,
        } = value;
        Self {
            id,
            name,
            category,
            price,
            description,
            images,
            status,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomListQuery {
    #[serde(default)]
    pub available: bool,
}
