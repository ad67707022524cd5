use serde::{Deserialize, Serialize};

use crate::model::{id::UserId, role::Role};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: UserId,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub photo_url: Option<String>,
}
