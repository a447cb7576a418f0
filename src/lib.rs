//! 마음로그: daily mood journaling with a hybrid Korean sentiment
//! classifier, a weighted wellbeing score and feedback-weighted challenge
//! recommendations, backed by SQLite.

pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
