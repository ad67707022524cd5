use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    amenity::{
        event::{CreateAmenity, DeleteAmenity, UpdateAmenity},
        Amenity, AmenityKind,
    },
    id::AmenityId,
};
use crate::store::Principal;

#[async_trait]
pub trait AmenityRepository: Send + Sync {
    async fn create(&self, principal: &Principal, event: CreateAmenity) -> AppResult<AmenityId>;
    async fn find_all(&self, principal: &Principal, kind: AmenityKind) -> AppResult<Vec<Amenity>>;
    async fn find_by_id(
        &self,
        principal: &Principal,
        kind: AmenityKind,
        amenity_id: &AmenityId,
    ) -> AppResult<Option<Amenity>>;
    async fn update(&self, principal: &Principal, event: UpdateAmenity) -> AppResult<()>;
    async fn delete(&self, principal: &Principal, event: DeleteAmenity) -> AppResult<()>;
}
