//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod analytics;
pub mod application;
pub mod contact;
pub mod essay;
pub mod favorite;
pub mod reference;
pub mod role;
pub mod scholarship;
pub mod session;
pub mod university;
pub mod user;
