//! HTTP handlers, one module per resource family.

pub mod car;
pub mod catalog;
pub mod track;
pub mod user;
