//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod analytics_repo;
pub mod application_document_repo;
pub mod application_repo;
pub mod application_task_repo;
pub mod contact_message_repo;
pub mod favorite_repo;
pub mod reference_repo;
pub mod role_repo;
pub mod saved_essay_repo;
pub mod schema_repo;
pub mod scholarship_repo;
pub mod session_repo;
pub mod university_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepo;
pub use application_document_repo::ApplicationDocumentRepo;
pub use application_repo::ApplicationRepo;
pub use application_task_repo::ApplicationTaskRepo;
pub use contact_message_repo::ContactMessageRepo;
pub use favorite_repo::FavoriteRepo;
pub use reference_repo::ReferenceRepo;
pub use role_repo::RoleRepo;
pub use saved_essay_repo::SavedEssayRepo;
pub use schema_repo::SchemaRepo;
pub use scholarship_repo::ScholarshipRepo;
pub use session_repo::SessionRepo;
pub use university_repo::UniversityRepo;
pub use user_repo::UserRepo;
