pub mod admin;
pub mod analytics;
pub mod applications;
pub mod auth;
pub mod contact;
pub mod essays;
pub mod favorites;
pub mod reference;
pub mod scholarships;
pub mod universities;
pub mod users;
