use crate::model::{
    id::RoomId,
    room::{RoomCategory, RoomStatus},
};

pub struct CreateRoom {
    pub name: String,
    pub category: RoomCategory,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub status: RoomStatus,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub name: Option<String>,
    pub category: Option<RoomCategory>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub status: Option<RoomStatus>,
}

#[derive(Debug)]
pub struct DeleteRoom {
    pub room_id: RoomId,
}
