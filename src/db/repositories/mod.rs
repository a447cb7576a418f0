pub mod feedback_repository;
pub mod record_repository;
pub mod user_repository;
