use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{model::id::AmenityId, store::Collection};

pub mod event;

/// Pools, restaurant/bar listings and meeting rooms share one document shape
/// and differ only by collection and accepted categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AmenityKind {
    Pool,
    Dining,
    MeetingRoom,
}

impl AmenityKind {
    pub fn collection(self) -> Collection {
        match self {
            AmenityKind::Pool => Collection::Piscines,
            AmenityKind::Dining => Collection::RestauBar,
            AmenityKind::MeetingRoom => Collection::Salles,
        }
    }

    pub fn categories(self) -> &'static [&'static str] {
        match self {
            AmenityKind::Pool => &["Indoor", "Outdoor", "Kids"],
            AmenityKind::Dining => &["Restaurant", "Bar", "Lounge"],
            AmenityKind::MeetingRoom => &["Conference", "Boardroom", "Banquet"],
        }
    }

    pub fn accepts(self, category: &str) -> bool {
        self.categories().contains(&category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum AmenityStatus {
    Open,
    Closed,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: AmenityId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
    pub status: AmenityStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_are_checked_per_kind() {
        assert!(AmenityKind::Pool.accepts("Outdoor"));
        assert!(!AmenityKind::Pool.accepts("Bar"));
        assert!(AmenityKind::Dining.accepts("Bar"));
        assert!(AmenityKind::MeetingRoom.accepts("Boardroom"));
        assert_eq!(AmenityKind::Dining.collection(), Collection::RestauBar);
    }
}
