use kernel::model::amenity::{
    event::{CreateAmenity, UpdateAmenity},
    AmenityStatus,
};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityDocument {
    pub name: String,
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
    pub status: AmenityStatus,
}

impl From<CreateAmenity> for AmenityDocument {
    fn from(value: CreateAmenity) -> Self {
        let CreateAmenity {
            kind: _,
            name,
            category,
            description,
            images,
            status,
        } = value;
        Self {
            name,
            category,
            description,
            images,
            status,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AmenityStatus>,
}

impl From<UpdateAmenity> for AmenityPatch {
    fn from(value: UpdateAmenity) -> Self {
        let UpdateAmenity {
            kind: _,
            amenity_id: _,
            name,
            category,
            description,
            images,
            status,
        } = value;
        Self {
            name,
            category,
            description,
            images,
            status,
        }
    }
}
