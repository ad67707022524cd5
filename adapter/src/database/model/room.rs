use kernel::model::room::{
    event::{CreateRoom, UpdateRoom},
    RoomCategory, RoomStatus,
};
use serde::Serialize;

// rooms コレクションに保存するドキュメントの形（id はキーなので持たない）
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDocument {
    pub name: String,
    pub category: RoomCategory,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub status: RoomStatus,
}

impl From<CreateRoom> for RoomDocument {
    fn from(value: CreateRoom) -> Self {
        let CreateRoom {
            name,
            category,
            price,
            description,
            images,
            status,
        } = value;
        Self {
            name,
            category,
            price,
            description,
            images,
            status,
        }
    }
}

// 指定されたフィールドだけを書き換えるための差分
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<RoomCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
}

impl RoomPatch {
    pub fn status(status: RoomStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl From<UpdateRoom> for RoomPatch {
    fn from(value: UpdateRoom) -> Self {
        let UpdateRoom {
            room_id: _,
            name,
            category,
            price,
            description,
            images,
            status,
        } = value;
        Self {
            name,
            category,
            price,
            description,
            images,
            status,
        }
    }
}
