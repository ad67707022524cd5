use kernel::model::{
    id::UserId,
    role::Role,
    user::event::{CreateUserProfile, UpdateUserRole},
};
use serde::Serialize;

// users/{uid} に保存するドキュメント。uid フィールドはキーと同じ値を持つ
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDocument {
    pub uid: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub photo_url: Option<String>,
}

impl From<CreateUserProfile> for UserProfileDocument {
    fn from(value: CreateUserProfile) -> Self {
        let CreateUserProfile {
            uid,
            display_name,
            email,
            role,
            photo_url,
        } = value;
        Self {
            uid,
            display_name,
            email,
            role,
            photo_url,
        }
    }
}

#[derive(Serialize)]
pub struct RolePatch {
    pub role: Role,
}

impl From<&UpdateUserRole> for RolePatch {
    fn from(value: &UpdateUserRole) -> Self {
        Self { role: value.role }
    }
}
