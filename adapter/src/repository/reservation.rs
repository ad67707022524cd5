use async_trait::async_trait;
use chrono::Utc;
use derive_new::new;
use kernel::{
    model::{
        id::{ReservationId, RoomId},
        reservation::{
            event::{
                CreateReservation, DeleteReservation, UpdateReservation, UpdateReservationStatus,
            },
            Reservation, ReservationStatus,
        },
        room::{Room, RoomStatus},
    },
    repository::reservation::ReservationRepository,
    store::{
        to_fields, Collection, DocumentPath, Principal, Query, ReportingStore, StoreError,
        WriteBatch,
    },
};
use shared::error::{AppError, AppResult};

use crate::database::model::{
    reservation::{ReservationDocument, ReservationStatusPatch},
    room::RoomPatch,
};

use super::room::room_path;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    store: ReportingStore,
}

fn reservation_path(reservation_id: &ReservationId) -> DocumentPath {
    DocumentPath::new(Collection::Reservations, reservation_id.as_str())
}

impl ReservationRepositoryImpl {
    async fn fetch_room(&self, principal: &Principal, room_id: &RoomId) -> AppResult<Option<Room>> {
        let doc = self.store.get(principal, &room_path(room_id)).await?;
        Ok(doc.map(|d| d.decode::<Room>()).transpose()?)
    }

    async fn fetch_reservation(
        &self,
        principal: &Principal,
        reservation_id: &ReservationId,
    ) -> AppResult<Reservation> {
        self.find_by_id(principal, reservation_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("reservation {reservation_id} not found"))
            })
    }

    // 予約対象の客室を取り直し、Available でなければ何も書かずに中断する
    async fn claim_room(&self, principal: &Principal, room_id: &RoomId) -> AppResult<Room> {
        let room = self
            .fetch_room(principal, room_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("room {room_id} not found")))?;
        if !room.is_available() {
            return Err(AppError::RoomUnavailable(format!(
                "room {} is no longer available",
                room.name
            )));
        }
        Ok(room)
    }

    // commit 時点でまだ Available の場合だけ Occupied にする
    fn stage_claim(batch: &mut WriteBatch, room: &Room) -> AppResult<()> {
        batch.update_if(
            room_path(&room.id),
            to_fields(&RoomPatch::status(RoomStatus::Available))?,
            to_fields(&RoomPatch::status(RoomStatus::Occupied))?,
        );
        Ok(())
    }

    // 先に commit した側が勝ち、後から来た側は客室を取れない
    async fn commit(&self, principal: &Principal, batch: WriteBatch) -> AppResult<()> {
        self.store
            .commit(principal, batch)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(path) => AppError::RoomUnavailable(format!(
                    "room is no longer available ({path} changed first)"
                )),
                other => other.into(),
            })
    }

    async fn require_room(&self, principal: &Principal, room_id: &RoomId) -> AppResult<Room> {
        self.fetch_room(principal, room_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("room {room_id} not found")))
    }

    // 解放対象の客室が既に削除されていればスキップする
    async fn stage_release(
        &self,
        principal: &Principal,
        batch: &mut WriteBatch,
        room_id: &RoomId,
        status: RoomStatus,
    ) -> AppResult<()> {
        if self.fetch_room(principal, room_id).await?.is_some() {
            batch.update(room_path(room_id), to_fields(&RoomPatch::status(status))?);
        } else {
            tracing::warn!(room_id = %room_id, "reservation referenced a room that no longer exists");
        }
        Ok(())
    }

    fn decode_all(docs: Vec<kernel::store::Document>) -> AppResult<Vec<Reservation>> {
        docs.iter()
            .map(|doc| doc.decode::<Reservation>().map_err(AppError::from))
            .collect()
    }
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn create(
        &self,
        principal: &Principal,
        event: CreateReservation,
    ) -> AppResult<ReservationId> {
        let CreateReservation {
            guest_name,
            room_id,
            check_in,
            check_out,
            guests,
            status,
        } = event;

        let room = if status.holds_room() {
            self.claim_room(principal, &room_id).await?
        } else {
            self.require_room(principal, &room_id).await?
        };

        let reservation_id = ReservationId::new();
        let document = ReservationDocument::build(
            guest_name,
            &room,
            check_in,
            check_out,
            guests,
            status,
            Utc::now(),
        );

        let mut batch = WriteBatch::new();
        batch.create(reservation_path(&reservation_id), to_fields(&document)?);
        if status.holds_room() {
            Self::stage_claim(&mut batch, &room)?;
        }
        self.commit(principal, batch).await?;

        tracing::info!(
            reservation_id = %reservation_id,
            room_id = %room.id,
            total_price = document.total_price,
            "reservation created"
        );
        Ok(reservation_id)
    }

    async fn update(&self, principal: &Principal, event: UpdateReservation) -> AppResult<()> {
        let UpdateReservation {
            reservation_id,
            guest_name,
            room_id,
            check_in,
            check_out,
            guests,
            status,
        } = event;

        let current = self.fetch_reservation(principal, &reservation_id).await?;
        let reassigned = current.room_id != room_id;
        let was_holding = current.status.holds_room();

        // 同じ客室を保持し続ける場合、その客室は既にこの予約で Occupied になっている
        let room = if status.holds_room() && (reassigned || !was_holding) {
            self.claim_room(principal, &room_id).await?
        } else {
            self.require_room(principal, &room_id).await?
        };

        let document = ReservationDocument::build(
            guest_name,
            &room,
            check_in,
            check_out,
            guests,
            status,
            current.created_at,
        );

        let mut batch = WriteBatch::new();
        batch.update(reservation_path(&reservation_id), to_fields(&document)?);
        if status.holds_room() && (reassigned || !was_holding) {
            Self::stage_claim(&mut batch, &room)?;
        }
        if was_holding && (reassigned || !status.holds_room()) {
            // 付け替えだけなら空室に、滞在終了を伴うならその状態に戻す
            let released = if status.holds_room() {
                RoomStatus::Available
            } else {
                status.released_room_status()
            };
            self.stage_release(principal, &mut batch, &current.room_id, released)
                .await?;
        }
        self.commit(principal, batch).await?;
        Ok(())
    }

    async fn update_status(
        &self,
        principal: &Principal,
        event: UpdateReservationStatus,
    ) -> AppResult<()> {
        let UpdateReservationStatus {
            reservation_id,
            status,
        } = event;
        let current = self.fetch_reservation(principal, &reservation_id).await?;

        let mut batch = WriteBatch::new();
        batch.update(
            reservation_path(&reservation_id),
            to_fields(&ReservationStatusPatch { status })?,
        );
        match (current.status.holds_room(), status.holds_room()) {
            (true, false) => {
                self.stage_release(
                    principal,
                    &mut batch,
                    &current.room_id,
                    status.released_room_status(),
                )
                .await?;
            }
            (false, true) => {
                let room = self.claim_room(principal, &current.room_id).await?;
                Self::stage_claim(&mut batch, &room)?;
            }
            _ => {}
        }
        self.commit(principal, batch).await?;
        Ok(())
    }

    async fn delete(&self, principal: &Principal, event: DeleteReservation) -> AppResult<()> {
        let current = self.fetch_reservation(principal, &event.reservation_id).await?;

        let mut batch = WriteBatch::new();
        batch.delete(reservation_path(&event.reservation_id));
        if current.status.holds_room() {
            self.stage_release(principal, &mut batch, &current.room_id, RoomStatus::Available)
                .await?;
        }
        self.commit(principal, batch).await?;
        Ok(())
    }

    async fn find_all(&self, principal: &Principal) -> AppResult<Vec<Reservation>> {
        let docs = self
            .store
            .list(principal, &Query::collection(Collection::Reservations))
            .await?;
        Self::decode_all(docs)
    }

    async fn find_by_id(
        &self,
        principal: &Principal,
        reservation_id: &ReservationId,
    ) -> AppResult<Option<Reservation>> {
        let doc = self
            .store
            .get(principal, &reservation_path(reservation_id))
            .await?;
        Ok(doc.map(|d| d.decode::<Reservation>()).transpose()?)
    }

    async fn find_by_room_id(
        &self,
        principal: &Principal,
        room_id: &RoomId,
    ) -> AppResult<Vec<Reservation>> {
        let query =
            Query::collection(Collection::Reservations).where_eq("roomId", room_id.as_str());
        let docs = self.store.list(principal, &query).await?;
        Self::decode_all(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use crate::repository::room::RoomRepositoryImpl;
    use chrono::NaiveDate;
    use kernel::{
        channel::{ErrorChannel, ErrorEvent, EventKind},
        model::{
            id::UserId,
            role::Role,
            room::{event::CreateRoom, RoomCategory},
        },
        repository::room::RoomRepository,
        store::{Change, Document, DocumentStore, Operation, StoreError},
    };
    use std::sync::{Arc, Mutex};
    use tokio::sync::broadcast;

    fn admin() -> Principal {
        Principal::user(UserId::from("admin"), Role::Superadmin)
    }

    fn receptionist() -> Principal {
        Principal::user(UserId::from("desk"), Role::Receptionist)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    struct Fixture {
        rooms: RoomRepositoryImpl,
        reservations: ReservationRepositoryImpl,
        events: Arc<Mutex<Vec<ErrorEvent>>>,
    }

    fn fixture_with(store: Arc<dyn DocumentStore>) -> Fixture {
        let channel = ErrorChannel::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        channel.subscribe(EventKind::Permission, move |e| sink.lock().unwrap().push(e.clone()));
        let reporting = ReportingStore::new(store, channel);
        Fixture {
            rooms: RoomRepositoryImpl::new(reporting.clone()),
            reservations: ReservationRepositoryImpl::new(reporting),
            events,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Arc::new(MemoryDocumentStore::new()))
    }

    async fn add_room(f: &Fixture, name: &str, price: f64, status: RoomStatus) -> RoomId {
        f.rooms
            .create(
                &admin(),
                CreateRoom {
                    name: name.into(),
                    category: RoomCategory::Standard,
                    price,
                    description: "Garden view".into(),
                    images: vec!["https://img.example.com/1.jpg".into()],
                    status,
                },
            )
            .await
            .unwrap()
    }

    async fn room_status(f: &Fixture, room_id: &RoomId) -> RoomStatus {
        f.rooms
            .find_by_id(&admin(), room_id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    fn booking(room_id: &RoomId) -> CreateReservation {
        CreateReservation::new(
            "Awa Diop".into(),
            room_id.clone(),
            date("2025-06-01"),
            date("2025-06-04"),
            2,
            ReservationStatus::Confirmed,
        )
    }

    #[tokio::test]
    async fn booking_an_available_room_occupies_it() -> anyhow::Result<()> {
        let f = fixture();
        let room_id = add_room(&f, "Baobab", 50.0, RoomStatus::Available).await;

        let reservation_id = f.reservations.create(&receptionist(), booking(&room_id)).await?;

        assert_eq!(room_status(&f, &room_id).await, RoomStatus::Occupied);
        let for_room = f.reservations.find_by_room_id(&receptionist(), &room_id).await?;
        assert_eq!(for_room.len(), 1);
        let reservation = &for_room[0];
        assert_eq!(reservation.id, reservation_id);
        assert_eq!(reservation.room_name, "Baobab");
        assert_eq!(reservation.total_price, 150.0);
        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        Ok(())
    }

    #[tokio::test]
    async fn booking_an_unavailable_room_writes_nothing() {
        let f = fixture();
        let room_id = add_room(&f, "Kapok", 80.0, RoomStatus::Cleaning).await;

        let res = f.reservations.create(&receptionist(), booking(&room_id)).await;
        assert!(matches!(res, Err(AppError::RoomUnavailable(_))));

        assert!(f.reservations.find_all(&admin()).await.unwrap().is_empty());
        assert_eq!(room_status(&f, &room_id).await, RoomStatus::Cleaning);
    }

    #[tokio::test]
    async fn second_booking_of_the_same_room_loses() {
        let f = fixture();
        let room_id = add_room(&f, "Baobab", 50.0, RoomStatus::Available).await;

        f.reservations
            .create(&receptionist(), booking(&room_id))
            .await
            .unwrap();
        let res = f.reservations.create(&receptionist(), booking(&room_id)).await;
        assert!(matches!(res, Err(AppError::RoomUnavailable(_))));
        assert_eq!(f.reservations.find_all(&admin()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reassigning_moves_the_occupancy() -> anyhow::Result<()> {
        let f = fixture();
        let a = add_room(&f, "A", 50.0, RoomStatus::Available).await;
        let b = add_room(&f, "B", 70.0, RoomStatus::Available).await;
        let reservation_id = f.reservations.create(&receptionist(), booking(&a)).await?;
        let created_at = f
            .reservations
            .find_by_id(&admin(), &reservation_id)
            .await?
            .unwrap()
            .created_at;

        f.reservations
            .update(
                &receptionist(),
                UpdateReservation::new(
                    reservation_id.clone(),
                    "Awa Diop".into(),
                    b.clone(),
                    date("2025-06-01"),
                    date("2025-06-03"),
                    2,
                    ReservationStatus::Confirmed,
                ),
            )
            .await?;

        assert_eq!(room_status(&f, &a).await, RoomStatus::Available);
        assert_eq!(room_status(&f, &b).await, RoomStatus::Occupied);
        let updated = f
            .reservations
            .find_by_id(&admin(), &reservation_id)
            .await?
            .unwrap();
        assert_eq!(updated.room_id, b);
        assert_eq!(updated.room_name, "B");
        assert_eq!(updated.total_price, 140.0);
        assert_eq!(updated.created_at, created_at);
        Ok(())
    }

    #[tokio::test]
    async fn updating_without_moving_keeps_the_room_occupied() -> anyhow::Result<()> {
        let f = fixture();
        let a = add_room(&f, "A", 50.0, RoomStatus::Available).await;
        let reservation_id = f.reservations.create(&receptionist(), booking(&a)).await?;

        f.reservations
            .update(
                &receptionist(),
                UpdateReservation::new(
                    reservation_id.clone(),
                    "Awa Diop-Sarr".into(),
                    a.clone(),
                    date("2025-06-01"),
                    date("2025-06-02"),
                    3,
                    ReservationStatus::InProgress,
                ),
            )
            .await?;

        assert_eq!(room_status(&f, &a).await, RoomStatus::Occupied);
        let updated = f
            .reservations
            .find_by_id(&admin(), &reservation_id)
            .await?
            .unwrap();
        assert_eq!(updated.guest_name, "Awa Diop-Sarr");
        assert_eq!(updated.total_price, 50.0);
        Ok(())
    }

    // commit だけが失敗するストア
    struct FailingCommitStore {
        inner: MemoryDocumentStore,
        fail: Mutex<bool>,
    }

    #[async_trait]
    impl DocumentStore for FailingCommitStore {
        async fn get(
            &self,
            principal: &Principal,
            path: &DocumentPath,
        ) -> Result<Option<Document>, StoreError> {
            self.inner.get(principal, path).await
        }

        async fn list(
            &self,
            principal: &Principal,
            query: &Query,
        ) -> Result<Vec<Document>, StoreError> {
            self.inner.list(principal, query).await
        }

        async fn commit(
            &self,
            principal: &Principal,
            batch: WriteBatch,
        ) -> Result<(), StoreError> {
            if *self.fail.lock().unwrap() {
                return Err(StoreError::Backend("connection reset".into()));
            }
            self.inner.commit(principal, batch).await
        }

        fn changes(&self) -> broadcast::Receiver<Change> {
            self.inner.changes()
        }

        async fn ping(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn failed_reassignment_changes_nothing() -> anyhow::Result<()> {
        let store = Arc::new(FailingCommitStore {
            inner: MemoryDocumentStore::new(),
            fail: Mutex::new(false),
        });
        let f = fixture_with(store.clone());
        let a = add_room(&f, "A", 50.0, RoomStatus::Available).await;
        let b = add_room(&f, "B", 70.0, RoomStatus::Available).await;
        let reservation_id = f.reservations.create(&receptionist(), booking(&a)).await?;

        *store.fail.lock().unwrap() = true;
        let res = f
            .reservations
            .update(
                &receptionist(),
                UpdateReservation::new(
                    reservation_id.clone(),
                    "Awa Diop".into(),
                    b.clone(),
                    date("2025-06-01"),
                    date("2025-06-04"),
                    2,
                    ReservationStatus::Confirmed,
                ),
            )
            .await;
        assert!(matches!(res, Err(AppError::DocumentStoreError(_))));

        assert_eq!(room_status(&f, &a).await, RoomStatus::Occupied);
        assert_eq!(room_status(&f, &b).await, RoomStatus::Available);
        let unchanged = f
            .reservations
            .find_by_id(&admin(), &reservation_id)
            .await?
            .unwrap();
        assert_eq!(unchanged.room_id, a);
        // ストア障害は権限エラーとして通知しない
        assert!(f.events.lock().unwrap().is_empty());
        Ok(())
    }

    // 読み取りの直後に他のタスクへ順番を譲るストア
    struct InterleavingStore {
        inner: MemoryDocumentStore,
    }

    #[async_trait]
    impl DocumentStore for InterleavingStore {
        async fn get(
            &self,
            principal: &Principal,
            path: &DocumentPath,
        ) -> Result<Option<Document>, StoreError> {
            let doc = self.inner.get(principal, path).await;
            tokio::task::yield_now().await;
            doc
        }

        async fn list(
            &self,
            principal: &Principal,
            query: &Query,
        ) -> Result<Vec<Document>, StoreError> {
            self.inner.list(principal, query).await
        }

        async fn commit(
            &self,
            principal: &Principal,
            batch: WriteBatch,
        ) -> Result<(), StoreError> {
            self.inner.commit(principal, batch).await
        }

        fn changes(&self) -> broadcast::Receiver<Change> {
            self.inner.changes()
        }

        async fn ping(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn overlapping_bookings_of_one_room_let_only_the_first_commit_win(
    ) -> anyhow::Result<()> {
        let f = fixture_with(Arc::new(InterleavingStore {
            inner: MemoryDocumentStore::new(),
        }));
        let room_id = add_room(&f, "Baobab", 50.0, RoomStatus::Available).await;
        let desk = receptionist();

        // 両方とも Available を読んだ後で commit する
        let (first, second) = tokio::join!(
            f.reservations.create(&desk, booking(&room_id)),
            f.reservations.create(&desk, booking(&room_id)),
        );
        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(AppError::RoomUnavailable(_)))));

        assert_eq!(f.reservations.find_by_room_id(&desk, &room_id).await?.len(), 1);
        assert_eq!(room_status(&f, &room_id).await, RoomStatus::Occupied);
        assert!(f.events.lock().unwrap().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn completing_while_reassigning_leaves_the_old_room_for_cleaning(
    ) -> anyhow::Result<()> {
        let f = fixture();
        let a = add_room(&f, "A", 50.0, RoomStatus::Available).await;
        let b = add_room(&f, "B", 70.0, RoomStatus::Available).await;
        let reservation_id = f.reservations.create(&receptionist(), booking(&a)).await?;

        f.reservations
            .update(
                &receptionist(),
                UpdateReservation::new(
                    reservation_id.clone(),
                    "Awa Diop".into(),
                    b.clone(),
                    date("2025-06-01"),
                    date("2025-06-04"),
                    2,
                    ReservationStatus::Completed,
                ),
            )
            .await?;

        assert_eq!(room_status(&f, &a).await, RoomStatus::Cleaning);
        assert_eq!(room_status(&f, &b).await, RoomStatus::Available);
        let updated = f
            .reservations
            .find_by_id(&admin(), &reservation_id)
            .await?
            .unwrap();
        assert_eq!(updated.room_id, b);
        assert_eq!(updated.status, ReservationStatus::Completed);
        Ok(())
    }

    #[tokio::test]
    async fn editing_a_stay_to_a_final_status_releases_its_room() -> anyhow::Result<()> {
        let f = fixture();
        let a = add_room(&f, "A", 50.0, RoomStatus::Available).await;
        let b = add_room(&f, "B", 50.0, RoomStatus::Available).await;
        let first = f.reservations.create(&receptionist(), booking(&a)).await?;
        let second = f.reservations.create(&receptionist(), booking(&b)).await?;

        let edit = |reservation_id: &ReservationId, room_id: &RoomId, status| {
            UpdateReservation::new(
                reservation_id.clone(),
                "Awa Diop".into(),
                room_id.clone(),
                date("2025-06-01"),
                date("2025-06-04"),
                2,
                status,
            )
        };
        f.reservations
            .update(&receptionist(), edit(&first, &a, ReservationStatus::Completed))
            .await?;
        f.reservations
            .update(&receptionist(), edit(&second, &b, ReservationStatus::Cancelled))
            .await?;

        assert_eq!(room_status(&f, &a).await, RoomStatus::Cleaning);
        assert_eq!(room_status(&f, &b).await, RoomStatus::Available);
        Ok(())
    }

    #[tokio::test]
    async fn denied_booking_fails_and_reports_once() {
        let f = fixture();
        let room_id = add_room(&f, "Baobab", 50.0, RoomStatus::Available).await;
        let guest = Principal::user(UserId::from("g"), Role::Guest);

        let res = f.reservations.create(&guest, booking(&room_id)).await;
        assert!(matches!(res, Err(AppError::PermissionDenied(_))));

        let events = f.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        let ErrorEvent::Permission(event) = &events[0];
        assert_eq!(event.operation, Operation::Create);
        assert!(event.path.starts_with("reservations/"));
        let data = event.request_resource_data.as_ref().unwrap();
        assert_eq!(data["roomId"], serde_json::json!(room_id.as_str()));
        drop(events);

        assert_eq!(room_status(&f, &room_id).await, RoomStatus::Available);
    }

    #[tokio::test]
    async fn finishing_a_stay_releases_the_room() -> anyhow::Result<()> {
        let f = fixture();
        let a = add_room(&f, "A", 50.0, RoomStatus::Available).await;
        let b = add_room(&f, "B", 50.0, RoomStatus::Available).await;
        let first = f.reservations.create(&receptionist(), booking(&a)).await?;
        let second = f.reservations.create(&receptionist(), booking(&b)).await?;

        f.reservations
            .update_status(
                &receptionist(),
                UpdateReservationStatus::new(first.clone(), ReservationStatus::InProgress),
            )
            .await?;
        assert_eq!(room_status(&f, &a).await, RoomStatus::Occupied);

        f.reservations
            .update_status(
                &receptionist(),
                UpdateReservationStatus::new(first.clone(), ReservationStatus::Completed),
            )
            .await?;
        assert_eq!(room_status(&f, &a).await, RoomStatus::Cleaning);

        f.reservations
            .update_status(
                &receptionist(),
                UpdateReservationStatus::new(second.clone(), ReservationStatus::Cancelled),
            )
            .await?;
        assert_eq!(room_status(&f, &b).await, RoomStatus::Available);

        // 再開には客室が空いている必要がある
        let res = f
            .reservations
            .update_status(
                &receptionist(),
                UpdateReservationStatus::new(first, ReservationStatus::Confirmed),
            )
            .await;
        assert!(matches!(res, Err(AppError::RoomUnavailable(_))));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_an_active_reservation_frees_its_room() -> anyhow::Result<()> {
        let f = fixture();
        let a = add_room(&f, "A", 50.0, RoomStatus::Available).await;
        let reservation_id = f.reservations.create(&receptionist(), booking(&a)).await?;

        f.reservations
            .delete(&receptionist(), DeleteReservation::new(reservation_id.clone()))
            .await?;

        assert_eq!(room_status(&f, &a).await, RoomStatus::Available);
        assert!(f
            .reservations
            .find_by_id(&admin(), &reservation_id)
            .await?
            .is_none());

        let res = f
            .reservations
            .delete(&receptionist(), DeleteReservation::new(reservation_id))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
