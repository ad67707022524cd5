use derive_new::new;
use garde::Validate;
use kernel::model::{
    auth::Credentials,
    id::UserId,
    role::Role,
    user::{event::UpdateUserRole, UserProfile},
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub items: Vec<UserResponse>,
}

impl From<Vec<UserProfile>> for UsersResponse {
    fn from(value: Vec<UserProfile>) -> Self {
        Self {
            items: value.into_iter().map(UserResponse::from).collect(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub uid: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub photo_url: Option<String>,
}

impl From<UserProfile> for UserResponse {
    fn from(value: UserProfile) -> Self {
        let UserProfile {
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

// 管理者がスタッフのアカウントとプロフィールを同時に作成する
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub display_name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(skip)]
    pub role: Role,
    #[garde(url)]
    pub photo_url: Option<String>,
}

impl CreateUserRequest {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRoleRequest {
    #[garde(skip)]
    role: Role,
}

#[derive(new)]
pub struct UpdateUserRoleRequestWithUserId(UserId, UpdateUserRoleRequest);
impl From<UpdateUserRoleRequestWithUserId> for UpdateUserRole {
    fn from(value: UpdateUserRoleRequestWithUserId) -> Self {
        let UpdateUserRoleRequestWithUserId(uid, UpdateUserRoleRequest { role }) = value;
        UpdateUserRole::new(uid, role)
    }
}
