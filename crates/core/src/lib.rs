//! ScholarHub domain core.
//!
//! Zero-I/O building blocks shared by the database and API layers: error
//! types, role names, validation rules, the scholarship search planner, essay
//! prompt construction and the static fallback catalogue.

pub mod application;
pub mod contact;
pub mod error;
pub mod essay;
pub mod fallback;
pub mod roles;
pub mod scholarship;
pub mod search;
pub mod types;
pub mod validation;
