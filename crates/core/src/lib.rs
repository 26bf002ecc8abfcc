//! Domain model for the mod catalog.
//!
//! Entities, enumerations and validation rules shared by the repository
//! layer and the HTTP API. Nothing here touches the database.

pub mod car;
pub mod catalog;
pub mod error;
pub mod roles;
pub mod salt;
pub mod track;
pub mod types;
pub mod user;
