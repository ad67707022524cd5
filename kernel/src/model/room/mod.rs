use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::model::id::RoomId;

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum RoomCategory {
    Standard,
    Deluxe,
    Suite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub category: RoomCategory,
    pub price: f64,
    pub description: String,
    pub images: Vec<String>,
    pub status: RoomStatus,
}

impl Room {
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }
}
