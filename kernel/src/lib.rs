pub mod binding;
pub mod channel;
pub mod guard;
pub mod model;
pub mod repository;
pub mod service;
pub mod store;
