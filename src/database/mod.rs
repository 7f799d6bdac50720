pub mod activity_repo;
pub mod feedback_repo;
pub mod registration_repo;
pub mod schema;
pub mod user_repo;

pub use schema::init_schema;
