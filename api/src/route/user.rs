use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::{
    auth::get_current_user,
    user::{change_role, delete_user, list_users, register_user},
};

pub fn build_user_router() -> Router<AppRegistry> {
    Router::new()
        .route("/users/me", get(get_current_user))
        .route("/users", get(list_users))
        .route("/users", post(register_user))
        .route("/users/:user_id/role", put(change_role))
        .route("/users/:user_id", delete(delete_user))
}
