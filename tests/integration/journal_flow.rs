use std::sync::Arc;

use maumlog::db::repositories::feedback_repository::FeedbackRepository;
use maumlog::db::DbPool;
use maumlog::error::{AppError, AppResult};
use maumlog::models::challenge::ChallengeCatalog;
use maumlog::models::mood::{EmotionStatus, MoodInput, SentimentLabel};
use maumlog::models::user::UserRegistration;
use maumlog::services::journal_service::JournalService;
use maumlog::services::sentiment_service::SentimentClassifier;
use maumlog::services::user_service::UserService;
use tempfile::TempDir;

fn setup() -> AppResult<(JournalService, UserService, DbPool, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db = DbPool::new(&db_path)?;
    let classifier = Arc::new(SentimentClassifier::keyword_only());
    let catalog = Arc::new(ChallengeCatalog::builtin());
    let journal = JournalService::new(db.clone(), classifier, catalog);
    let users = UserService::new(db.clone());
    Ok((journal, users, db, temp_dir))
}

fn register(users: &UserService, username: &str) -> AppResult<i64> {
    users.register(&UserRegistration {
        username: username.to_string(),
        password: "test-password".to_string(),
        ..Default::default()
    })
}

fn happy_input() -> MoodInput {
    MoodInput {
        mood: Some(8),
        sleep_hours: Some(7),
        activity: Some(7),
        feeling_text: Some("오늘 정말 행복했다".to_string()),
    }
}

#[test]
fn evaluate_day_end_to_end() -> AppResult<()> {
    let (journal, users, _db, _temp_dir) = setup()?;
    register(&users, "jiyoung")?;

    let result = journal.evaluate_day("jiyoung", &happy_input())?;

    assert!(result.record_id > 0);
    assert_eq!(result.text_emotion, SentimentLabel::Positive);
    // 8×0.35 + 7×0.15 + 7×0.20 + 10×0.30 = 8.25
    assert!((result.score - 8.25).abs() < 1e-9);
    assert_eq!(result.emotion_status, EmotionStatus::Positive);
    assert_eq!(result.challenges.len(), 3);

    assert_eq!(result.breakdown.mood_term, "8점 × 35% = 2.80");
    assert_eq!(result.breakdown.sleep_term, "7시간(보정) × 15% = 1.05");
    assert_eq!(result.breakdown.activity_term, "7점 × 20% = 1.40");
    assert_eq!(result.breakdown.text_term, "Positive(10점) × 30% = 3.00");
    assert_eq!(result.breakdown.raw_total, "8.25");
    assert!(!result.breakdown.cap_applied);

    Ok(())
}

#[test]
fn evaluation_wire_shape_uses_snake_case_keys() -> AppResult<()> {
    let (journal, users, _db, _temp_dir) = setup()?;
    register(&users, "jiyoung")?;

    let result = journal.evaluate_day("jiyoung", &happy_input())?;
    let json = serde_json::to_value(&result)?;

    assert!(json.get("record_id").is_some());
    assert_eq!(json["text_emotion"], "Positive");
    assert_eq!(json["emotion_status"], "positive");
    let challenges = json["challenges"].as_array().unwrap();
    assert_eq!(challenges.len(), 3);
    for challenge in challenges {
        assert!(challenge.get("title").is_some());
        assert!(challenge.get("url").is_some());
        assert!(challenge.get("type").is_some());
    }

    Ok(())
}

#[test]
fn evaluate_day_for_unknown_user_is_not_found() -> AppResult<()> {
    let (journal, _users, _db, _temp_dir) = setup()?;

    let result = journal.evaluate_day("nobody", &happy_input());
    assert!(matches!(result, Err(AppError::NotFound)));

    Ok(())
}

#[test]
fn records_are_listed_in_date_order_per_user() -> AppResult<()> {
    let (journal, users, _db, _temp_dir) = setup()?;
    register(&users, "jiyoung")?;
    register(&users, "minsu")?;

    let first = journal.evaluate_day("jiyoung", &happy_input())?;
    let second = journal.evaluate_day("jiyoung", &MoodInput::default())?;
    journal.evaluate_day("minsu", &MoodInput::default())?;

    let records = journal.load_records("jiyoung")?;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first.record_id);
    assert_eq!(records[1].id, second.record_id);
    assert!(records[0].date <= records[1].date);
    assert_eq!(records[0].text.as_deref(), Some("오늘 정말 행복했다"));
    assert_eq!(records[0].recommended_challenges.len(), 3);
    assert!(records[0].feedback_given.is_empty());

    Ok(())
}

#[test]
fn feedback_updates_record_and_aggregate() -> AppResult<()> {
    let (journal, users, db, _temp_dir) = setup()?;
    register(&users, "jiyoung")?;

    let evaluation = journal.evaluate_day("jiyoung", &happy_input())?;
    let title = evaluation.challenges[0].title.clone();

    journal.record_feedback("jiyoung", evaluation.record_id, &title, 1)?;

    let records = journal.load_records("jiyoung")?;
    assert_eq!(records[0].feedback_given.get(&title), Some(&1));

    let conn = db.get_connection()?;
    let aggregate = FeedbackRepository::aggregate_scores(&conn)?;
    assert_eq!(aggregate.get(&title), Some(&1));

    // A later rating on the same challenge replaces the record entry and
    // shifts the aggregate.
    journal.record_feedback("jiyoung", evaluation.record_id, &title, -1)?;

    let records = journal.load_records("jiyoung")?;
    assert_eq!(records[0].feedback_given.get(&title), Some(&-1));

    let aggregate = FeedbackRepository::aggregate_scores(&conn)?;
    assert_eq!(aggregate.get(&title), Some(&0));

    Ok(())
}

#[test]
fn feedback_rejects_invalid_ratings() -> AppResult<()> {
    let (journal, users, _db, _temp_dir) = setup()?;
    register(&users, "jiyoung")?;

    let evaluation = journal.evaluate_day("jiyoung", &happy_input())?;
    let title = evaluation.challenges[0].title.clone();

    for rating in [2, -2, 100] {
        let result = journal.record_feedback("jiyoung", evaluation.record_id, &title, rating);
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    // Zero is explicitly allowed.
    journal.record_feedback("jiyoung", evaluation.record_id, &title, 0)?;

    Ok(())
}

#[test]
fn feedback_on_another_users_record_is_not_found() -> AppResult<()> {
    let (journal, users, _db, _temp_dir) = setup()?;
    register(&users, "jiyoung")?;
    register(&users, "minsu")?;

    let evaluation = journal.evaluate_day("jiyoung", &happy_input())?;
    let title = evaluation.challenges[0].title.clone();

    let result = journal.record_feedback("minsu", evaluation.record_id, &title, 1);
    assert!(matches!(result, Err(AppError::NotFound)));

    // The owner's record is untouched.
    let records = journal.load_records("jiyoung")?;
    assert!(records[0].feedback_given.is_empty());

    Ok(())
}

#[test]
fn negative_text_caps_high_ratings() -> AppResult<()> {
    let (journal, users, _db, _temp_dir) = setup()?;
    register(&users, "jiyoung")?;

    let input = MoodInput {
        mood: Some(10),
        sleep_hours: Some(9),
        activity: Some(10),
        feeling_text: Some("사실은 너무 우울했다".to_string()),
    };
    let result = journal.evaluate_day("jiyoung", &input)?;

    assert_eq!(result.text_emotion, SentimentLabel::Negative);
    assert_eq!(result.score, 6.0);
    assert_eq!(result.emotion_status, EmotionStatus::Fair);
    assert!(result.breakdown.cap_applied);

    Ok(())
}
