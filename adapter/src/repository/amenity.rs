use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        amenity::{
            event::{CreateAmenity, DeleteAmenity, UpdateAmenity},
            Amenity, AmenityKind,
        },
        id::AmenityId,
    },
    repository::amenity::AmenityRepository,
    store::{to_fields, DocumentPath, Principal, Query, ReportingStore},
};
use shared::error::{AppError, AppResult};

use crate::database::model::amenity::{AmenityDocument, AmenityPatch};

#[derive(new)]
pub struct AmenityRepositoryImpl {
    store: ReportingStore,
}

fn amenity_path(kind: AmenityKind, amenity_id: &AmenityId) -> DocumentPath {
    DocumentPath::new(kind.collection(), amenity_id.as_str())
}

fn ensure_category(kind: AmenityKind, category: &str) -> AppResult<()> {
    if kind.accepts(category) {
        Ok(())
    } else {
        Err(AppError::UnprocessableEntity(format!(
            "{category} is not a valid {kind} category (expected one of {})",
            kind.categories().join(", ")
        )))
    }
}

#[async_trait]
impl AmenityRepository for AmenityRepositoryImpl {
    async fn create(&self, principal: &Principal, event: CreateAmenity) -> AppResult<AmenityId> {
        ensure_category(event.kind, &event.category)?;
        let amenity_id = AmenityId::new();
        let path = amenity_path(event.kind, &amenity_id);
        let fields = to_fields(&AmenityDocument::from(event))?;
        self.store.create(principal, &path, fields).await?;
        Ok(amenity_id)
    }

    async fn find_all(&self, principal: &Principal, kind: AmenityKind) -> AppResult<Vec<Amenity>> {
        let docs = self
            .store
            .list(principal, &Query::collection(kind.collection()))
            .await?;
        docs.iter()
            .map(|doc| doc.decode::<Amenity>().map_err(AppError::from))
            .collect()
    }

    async fn find_by_id(
        &self,
        principal: &Principal,
        kind: AmenityKind,
        amenity_id: &AmenityId,
    ) -> AppResult<Option<Amenity>> {
        let doc = self
            .store
            .get(principal, &amenity_path(kind, amenity_id))
            .await?;
        Ok(doc.map(|d| d.decode::<Amenity>()).transpose()?)
    }

    async fn update(&self, principal: &Principal, event: UpdateAmenity) -> AppResult<()> {
        if let Some(category) = event.category.as_deref() {
            ensure_category(event.kind, category)?;
        }
        let path = amenity_path(event.kind, &event.amenity_id);
        let patch = to_fields(&AmenityPatch::from(event))?;
        if patch.is_empty() {
            return Ok(());
        }
        self.store.update(principal, &path, patch).await?;
        Ok(())
    }

    async fn delete(&self, principal: &Principal, event: DeleteAmenity) -> AppResult<()> {
        self.store
            .delete(principal, &amenity_path(event.kind, &event.amenity_id))
            .await?;
        Ok(())
    }
}
