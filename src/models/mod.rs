pub mod challenge;
pub mod feedback;
pub mod mood;
pub mod record;
pub mod screening;
pub mod user;
