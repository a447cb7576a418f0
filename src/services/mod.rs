pub mod challenge_service;
pub mod journal_service;
pub mod scoring_service;
pub mod screening_service;
pub mod sentiment_model;
pub mod sentiment_service;
pub mod user_service;
