use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        id::RoomId,
        room::{
            event::{CreateRoom, DeleteRoom, UpdateRoom},
            Room, RoomStatus,
        },
    },
    repository::room::RoomRepository,
    store::{to_fields, Collection, DocumentPath, Principal, Query, ReportingStore},
};
use shared::error::{AppError, AppResult};

use crate::database::model::room::{RoomDocument, RoomPatch};

#[derive(new)]
pub struct RoomRepositoryImpl {
    store: ReportingStore,
}

pub(crate) fn room_path(room_id: &RoomId) -> DocumentPath {
    DocumentPath::new(Collection::Rooms, room_id.as_str())
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, principal: &Principal, event: CreateRoom) -> AppResult<RoomId> {
        if event.images.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "a room needs at least one image".into(),
            ));
        }
        let room_id = RoomId::new();
        let fields = to_fields(&RoomDocument::from(event))?;
        self.store
            .create(principal, &room_path(&room_id), fields)
            .await?;
        Ok(room_id)
    }

    async fn find_all(&self, principal: &Principal) -> AppResult<Vec<Room>> {
        let docs = self
            .store
            .list(principal, &Query::collection(Collection::Rooms))
            .await?;
        docs.iter()
            .map(|doc| doc.decode::<Room>().map_err(AppError::from))
            .collect()
    }

    async fn find_available(&self, principal: &Principal) -> AppResult<Vec<Room>> {
        let query = Query::collection(Collection::Rooms)
            .where_eq("status", RoomStatus::Available.to_string());
        let docs = self.store.list(principal, &query).await?;
        docs.iter()
            .map(|doc| doc.decode::<Room>().map_err(AppError::from))
            .collect()
    }

    async fn find_by_id(&self, principal: &Principal, room_id: &RoomId) -> AppResult<Option<Room>> {
        let doc = self.store.get(principal, &room_path(room_id)).await?;
        Ok(doc.map(|d| d.decode::<Room>()).transpose()?)
    }

    async fn update(&self, principal: &Principal, event: UpdateRoom) -> AppResult<()> {
        if event.images.as_ref().is_some_and(Vec::is_empty) {
            return Err(AppError::UnprocessableEntity(
                "a room needs at least one image".into(),
            ));
        }
        let path = room_path(&event.room_id);
        let patch = to_fields(&RoomPatch::from(event))?;
        if patch.is_empty() {
            return Ok(());
        }
        self.store.update(principal, &path, patch).await?;
        Ok(())
    }

    async fn delete(&self, principal: &Principal, event: DeleteRoom) -> AppResult<()> {
        self.store
            .delete(principal, &room_path(&event.room_id))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use kernel::{
        channel::{ErrorChannel, ErrorEvent, EventKind},
        model::{id::UserId, role::Role, room::RoomCategory},
        store::Operation,
    };
    use std::sync::{Arc, Mutex};

    fn admin() -> Principal {
        Principal::user(UserId::from("admin"), Role::Superadmin)
    }

    fn new_room(name: &str) -> CreateRoom {
        CreateRoom {
            name: name.into(),
            category: RoomCategory::Deluxe,
            price: 120.0,
            description: "Sea view".into(),
            images: vec!["https://img.example.com/deluxe.jpg".into()],
            status: RoomStatus::Available,
        }
    }

    #[tokio::test]
    async fn test_register_room() -> anyhow::Result<()> {
        let repo = RoomRepositoryImpl::new(ReportingStore::new(
            Arc::new(MemoryDocumentStore::new()),
            ErrorChannel::new(),
        ));

        let room_id = repo.create(&admin(), new_room("Baobab")).await?;

        let res = repo.find_all(&Principal::anonymous()).await?;
        assert_eq!(res.len(), 1);

        let res = repo.find_by_id(&Principal::anonymous(), &room_id).await?;
        let Room {
            id,
            name,
            category,
            price,
            description,
            images,
            status,
        } = res.unwrap();
        assert_eq!(id, room_id);
        assert_eq!(name, "Baobab");
        assert_eq!(category, RoomCategory::Deluxe);
        assert_eq!(price, 120.0);
        assert_eq!(description, "Sea view");
        assert_eq!(images, vec!["https://img.example.com/deluxe.jpg".to_string()]);
        assert_eq!(status, RoomStatus::Available);

        repo.update(
            &admin(),
            UpdateRoom {
                room_id: room_id.clone(),
                name: None,
                category: None,
                price: Some(140.0),
                description: None,
                images: None,
                status: Some(RoomStatus::Cleaning),
            },
        )
        .await?;
        let updated = repo.find_by_id(&admin(), &room_id).await?.unwrap();
        assert_eq!(updated.price, 140.0);
        assert_eq!(updated.name, "Baobab");
        assert!(repo.find_available(&admin()).await?.is_empty());

        repo.delete(&admin(), DeleteRoom { room_id: room_id.clone() }).await?;
        assert!(repo.find_by_id(&admin(), &room_id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn denied_write_fails_and_reports_exactly_once() {
        let channel = ErrorChannel::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        channel.subscribe(EventKind::Permission, move |e| sink.lock().unwrap().push(e.clone()));
        let repo = RoomRepositoryImpl::new(ReportingStore::new(
            Arc::new(MemoryDocumentStore::new()),
            channel,
        ));

        let receptionist = Principal::user(UserId::from("r"), Role::Receptionist);
        let res = repo.create(&receptionist, new_room("Kapok")).await;
        assert!(matches!(res, Err(AppError::PermissionDenied(_))));

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let ErrorEvent::Permission(event) = &events[0];
        assert_eq!(event.operation, Operation::Create);
        assert!(event.path.starts_with("rooms/"));
        assert_eq!(
            event.request_resource_data.as_ref().unwrap()["name"],
            serde_json::json!("Kapok")
        );
    }

    #[tokio::test]
    async fn rooms_without_images_are_rejected() {
        let repo = RoomRepositoryImpl::new(ReportingStore::new(
            Arc::new(MemoryDocumentStore::new()),
            ErrorChannel::new(),
        ));
        let mut room = new_room("Empty");
        room.images.clear();
        assert!(matches!(
            repo.create(&admin(), room).await,
            Err(AppError::UnprocessableEntity(_))
        ));
    }
}
