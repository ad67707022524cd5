use serde_json::{Map, Value};

use crate::model::{id::UserId, role::Role, user::UserProfile};
use crate::store::{Collection, Operation, PermissionError, StoreError};

/// Who a store request runs as. An identity without a role has signed in
/// but has no profile document yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principal {
    uid: Option<UserId>,
    role: Option<Role>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn identity(uid: UserId) -> Self {
        Self {
            uid: Some(uid),
            role: None,
        }
    }

    pub fn user(uid: UserId, role: Role) -> Self {
        Self {
            uid: Some(uid),
            role: Some(role),
        }
    }

    pub fn uid(&self) -> Option<&UserId> {
        self.uid.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    fn has_role(&self, allowed: &[Role]) -> bool {
        self.role.is_some_and(|r| allowed.contains(&r))
    }

    fn is(&self, uid: Option<&str>) -> bool {
        matches!((self.uid.as_ref(), uid), (Some(me), Some(other)) if me.as_str() == other)
    }
}

impl From<&UserProfile> for Principal {
    fn from(value: &UserProfile) -> Self {
        Self::user(value.uid.clone(), value.role)
    }
}

const CATALOG_EDITORS: &[Role] = &[Role::Superadmin];
const AMENITY_EDITORS: &[Role] = &[Role::Superadmin, Role::StockManager];
const FRONT_DESK: &[Role] = &[Role::Superadmin, Role::Receptionist];
const ADMINS: &[Role] = &[Role::Superadmin];

/// Access rules shared by every store backend. `doc_id` is `None` for list
/// requests; `data` is the payload of create/update requests.
pub fn authorize(
    principal: &Principal,
    collection: Collection,
    doc_id: Option<&str>,
    operation: Operation,
    data: Option<&Map<String, Value>>,
) -> bool {
    let read = matches!(operation, Operation::Get | Operation::List);
    match collection {
        Collection::Rooms => {
            read || principal.has_role(CATALOG_EDITORS) || occupancy_change(principal, operation, data)
        }
        Collection::Piscines | Collection::RestauBar | Collection::Salles => {
            read || principal.has_role(AMENITY_EDITORS)
        }
        Collection::Reservations => principal.has_role(FRONT_DESK),
        Collection::Users => match operation {
            Operation::Get => principal.is(doc_id) || principal.has_role(ADMINS),
            // 本人によるプロフィール作成は guest ロールに限る
            Operation::Create => {
                principal.has_role(ADMINS)
                    || (principal.is(doc_id)
                        && data.is_some_and(|d| {
                            d.get("role") == Some(&Value::from(Role::Guest.as_ref()))
                                && d.get("uid").and_then(Value::as_str) == doc_id
                        }))
            }
            Operation::List | Operation::Update | Operation::Delete => {
                principal.has_role(ADMINS)
            }
        },
    }
}

// フロントは予約に伴う客室の status 変更だけを書ける
fn occupancy_change(
    principal: &Principal,
    operation: Operation,
    data: Option<&Map<String, Value>>,
) -> bool {
    operation == Operation::Update
        && principal.has_role(FRONT_DESK)
        && data.is_some_and(|d| !d.is_empty() && d.keys().all(|key| key == "status"))
}

/// Runs [`authorize`] and turns a rejection into `StoreError::PermissionDenied`.
pub fn check(
    principal: &Principal,
    collection: Collection,
    doc_id: Option<&str>,
    operation: Operation,
    data: Option<&Map<String, Value>>,
) -> Result<(), StoreError> {
    if authorize(principal, collection, doc_id, operation, data) {
        return Ok(());
    }
    let path = match doc_id {
        Some(id) => format!("{collection}/{id}"),
        None => collection.to_string(),
    };
    Err(StoreError::PermissionDenied(PermissionError::new(
        path,
        operation,
        data.cloned().map(Value::Object),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(uid: &str, role: Role) -> Principal {
        Principal::user(UserId::from(uid), role)
    }

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn catalog_is_public_but_only_admins_edit_rooms() {
        let anonymous = Principal::anonymous();
        assert!(authorize(&anonymous, Collection::Rooms, None, Operation::List, None));
        assert!(!authorize(&anonymous, Collection::Rooms, Some("r1"), Operation::Update, None));
        assert!(!authorize(
            &user("u1", Role::StockManager),
            Collection::Rooms,
            Some("r1"),
            Operation::Update,
            None
        ));
        assert!(authorize(
            &user("u1", Role::Superadmin),
            Collection::Rooms,
            Some("r1"),
            Operation::Delete,
            None
        ));
    }

    #[test]
    fn front_desk_may_only_flip_room_status() {
        let desk = user("u8", Role::Receptionist);
        let status = fields(json!({ "status": "Occupied" }));
        let price = fields(json!({ "status": "Occupied", "price": 1.0 }));
        let empty = Map::new();
        assert!(authorize(&desk, Collection::Rooms, Some("r1"), Operation::Update, Some(&status)));
        assert!(!authorize(&desk, Collection::Rooms, Some("r1"), Operation::Update, Some(&price)));
        assert!(!authorize(&desk, Collection::Rooms, Some("r1"), Operation::Update, Some(&empty)));
        assert!(!authorize(&desk, Collection::Rooms, Some("r1"), Operation::Create, Some(&status)));
        assert!(!authorize(&desk, Collection::Rooms, Some("r1"), Operation::Delete, None));
        assert!(!authorize(
            &user("u9", Role::Guest),
            Collection::Rooms,
            Some("r1"),
            Operation::Update,
            Some(&status)
        ));
    }

    #[test]
    fn stock_managers_edit_amenities() {
        let manager = user("u2", Role::StockManager);
        assert!(authorize(&manager, Collection::Piscines, Some("p1"), Operation::Update, None));
        assert!(authorize(&manager, Collection::Salles, None, Operation::List, None));
        assert!(!authorize(
            &user("u3", Role::Guest),
            Collection::RestauBar,
            Some("b1"),
            Operation::Create,
            None
        ));
    }

    #[test]
    fn reservations_belong_to_the_front_desk() {
        assert!(authorize(
            &user("u4", Role::Receptionist),
            Collection::Reservations,
            None,
            Operation::List,
            None
        ));
        assert!(!authorize(
            &user("u5", Role::Guest),
            Collection::Reservations,
            None,
            Operation::List,
            None
        ));
        assert!(!authorize(
            &Principal::anonymous(),
            Collection::Reservations,
            Some("x"),
            Operation::Get,
            None
        ));
    }

    #[test]
    fn users_may_read_themselves_and_self_register_as_guest() {
        let me = Principal::identity(UserId::from("u6"));
        assert!(authorize(&me, Collection::Users, Some("u6"), Operation::Get, None));
        assert!(!authorize(&me, Collection::Users, Some("u7"), Operation::Get, None));

        let guest = fields(json!({ "uid": "u6", "role": "guest" }));
        let admin = fields(json!({ "uid": "u6", "role": "superadmin" }));
        assert!(authorize(&me, Collection::Users, Some("u6"), Operation::Create, Some(&guest)));
        assert!(!authorize(&me, Collection::Users, Some("u6"), Operation::Create, Some(&admin)));
        assert!(!authorize(&me, Collection::Users, Some("u7"), Operation::Create, Some(&guest)));
    }

    #[test]
    fn rejection_carries_path_operation_and_payload() {
        let data = fields(json!({ "status": "Occupied" }));
        let err = check(
            &Principal::anonymous(),
            Collection::Rooms,
            Some("r1"),
            Operation::Update,
            Some(&data),
        )
        .unwrap_err();
        assert_eq!(
            err,
            StoreError::PermissionDenied(PermissionError::new(
                "rooms/r1",
                Operation::Update,
                Some(json!({ "status": "Occupied" }))
            ))
        );
    }
}
