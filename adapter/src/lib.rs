pub mod ai;
pub mod database;
pub mod identity;
pub mod mail;
pub mod redis;
pub mod repository;
pub mod store;
