pub mod amenity;
pub mod document;
pub mod reservation;
pub mod room;
pub mod user;
