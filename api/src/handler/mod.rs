pub mod amenity;
pub mod auth;
pub mod health;
pub mod live;
pub mod notification;
pub mod reservation;
pub mod room;
pub mod suggestion;
pub mod user;
