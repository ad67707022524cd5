use garde::Validate;
use kernel::model::{
    amenity::{
        event::{CreateAmenity, UpdateAmenity},
        Amenity, AmenityKind, AmenityStatus,
    },
    id::AmenityId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAmenityRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(length(min = 1))]
    pub category: String,
    #[garde(skip)]
    #[serde(default)]
    pub description: String,
    #[garde(inner(url))]
    #[serde(default)]
    pub images: Vec<String>,
    #[garde(skip)]
    pub status: AmenityStatus,
}

impl CreateAmenityRequest {
    pub fn into_event(self, kind: AmenityKind) -> CreateAmenity {
        let CreateAmenityRequest {
            name,
            category,
            description,
            images,
            status,
        } = self;
        CreateAmenity {
            kind,
            name,
            category,
            description,
            images,
            status,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAmenityRequest {
    #[garde(length(min = 1))]
    pub name: Option<String>,
    #[garde(length(min = 1))]
    pub category: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(inner(url)))]
    pub images: Option<Vec<String>>,
    #[garde(skip)]
    pub status: Option<AmenityStatus>,
}

impl UpdateAmenityRequest {
    pub fn into_event(self, kind: AmenityKind, amenity_id: AmenityId) -> UpdateAmenity {
        let UpdateAmenityRequest {
            name,
            category,
            description,
            images,
            status,
        } = self;
        UpdateAmenity {
            kind,
            amenity_id,
            name,
            category,
            description,
            images,
            status,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityResponse {
    pub id: AmenityId,
    pub name: String,
    pub category: String,
    pub description: String,
    pub images: Vec<String>,
    pub status: AmenityStatus,
}

impl From<Amenity> for AmenityResponse {
    fn from(value: Amenity) -> Self {
        let Amenity {
            id,
            name,
            category,
            description,
            images,
            status,
        } = value;
        Self {
            id,
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
pub struct AmenitiesResponse {
    pub items: Vec<AmenityResponse>,
}

impl From<Vec<Amenity>> for AmenitiesResponse {
    fn from(value: Vec<Amenity>) -> Self {
        Self {
            items: value.into_iter().map(AmenityResponse::from).collect(),
        }
    }
}
