pub mod amenity;
pub mod auth;
pub mod id;
pub mod notification;
pub mod reservation;
pub mod role;
pub mod room;
pub mod suggestion;
pub mod user;
