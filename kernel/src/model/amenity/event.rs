use crate::model::{
    amenity::{AmenityKind, AmenityStatus},
    id::AmenityId,
};

pub struct CreateAmenity {
    pub kind: AmenityKind,
    pub name: String,
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
    pub status: AmenityStatus,
}

#[derive(Debug)]
pub struct UpdateAmenity {
    pub kind: AmenityKind,
    pub amenity_id: AmenityId,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub status: Option<AmenityStatus>,
}

#[derive(Debug)]
pub struct DeleteAmenity {
    pub kind: AmenityKind,
    pub amenity_id: AmenityId,
}
