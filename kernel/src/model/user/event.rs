use derive_new::new;

use crate::model::{id::UserId, role::Role};

#[derive(new, Debug)]
pub struct CreateUserProfile {
    pub uid: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub photo_url: Option<String>,
}

#[derive(new, Debug)]
pub struct UpdateUserRole {
    pub uid: UserId,
    pub role: Role,
}

#[derive(new, Debug)]
pub struct DeleteUserProfile {
    pub uid: UserId,
}
