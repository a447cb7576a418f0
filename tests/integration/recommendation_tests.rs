use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use maumlog::db::repositories::feedback_repository::FeedbackRepository;
use maumlog::db::DbPool;
use maumlog::error::AppResult;
use maumlog::models::challenge::{ChallengeCatalog, EnergyTier};
use maumlog::models::mood::MoodInput;
use maumlog::models::user::UserRegistration;
use maumlog::services::challenge_service::{energy_tier, ChallengeRecommender};
use maumlog::services::journal_service::JournalService;
use maumlog::services::sentiment_service::SentimentClassifier;
use maumlog::services::user_service::UserService;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn setup() -> AppResult<(JournalService, UserService, DbPool, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db = DbPool::new(temp_dir.path().join("test.db"))?;
    let classifier = Arc::new(SentimentClassifier::keyword_only());
    let catalog = Arc::new(ChallengeCatalog::builtin());
    let journal = JournalService::new(db.clone(), classifier, catalog);
    let users = UserService::new(db.clone());
    users.register(&UserRegistration {
        username: "jiyoung".to_string(),
        password: "test-password".to_string(),
        ..Default::default()
    })?;
    Ok((journal, users, db, temp_dir))
}

#[test]
fn every_evaluation_gets_three_distinct_challenges() -> AppResult<()> {
    let (journal, _users, _db, _temp_dir) = setup()?;

    let inputs = [
        MoodInput::default(),
        MoodInput {
            mood: Some(9),
            sleep_hours: Some(3),
            activity: Some(9),
            feeling_text: None,
        },
        MoodInput {
            mood: Some(2),
            sleep_hours: Some(8),
            activity: Some(2),
            feeling_text: Some("오늘은 너무 지루했다".to_string()),
        },
        MoodInput {
            mood: Some(9),
            sleep_hours: Some(8),
            activity: Some(9),
            feeling_text: Some("계속 불안하고 초조하다".to_string()),
        },
    ];

    for input in &inputs {
        let result = journal.evaluate_day("jiyoung", input)?;
        assert_eq!(result.challenges.len(), 3);
        let titles: HashSet<_> = result.challenges.iter().map(|c| &c.title).collect();
        assert_eq!(titles.len(), 3, "duplicate challenge in {:?}", result.challenges);
    }

    Ok(())
}

#[test]
fn feedback_history_shifts_the_aggregate() -> AppResult<()> {
    let (journal, _users, db, _temp_dir) = setup()?;

    let evaluation = journal.evaluate_day("jiyoung", &MoodInput::default())?;
    let liked = evaluation.challenges[0].title.clone();
    let disliked = evaluation.challenges[1].title.clone();

    journal.record_feedback("jiyoung", evaluation.record_id, &liked, 1)?;
    journal.record_feedback("jiyoung", evaluation.record_id, &disliked, -1)?;

    let second = journal.evaluate_day("jiyoung", &MoodInput::default())?;
    journal.record_feedback("jiyoung", second.record_id, &liked, 1)?;

    let conn = db.get_connection()?;
    let aggregate = FeedbackRepository::aggregate_scores(&conn)?;
    assert_eq!(aggregate.get(&liked), Some(&2));
    assert_eq!(aggregate.get(&disliked), Some(&-1));

    Ok(())
}

#[test]
fn downvoted_challenge_still_reachable_via_weight_floor() {
    let catalog = Arc::new(ChallengeCatalog::builtin());
    let recommender = ChallengeRecommender::new(catalog.clone());
    let mut rng = StdRng::seed_from_u64(11);

    // Every high-tier challenge heavily downvoted except none; the floor
    // keeps them all drawable, so three still come back.
    let mut feedback = HashMap::new();
    for item in catalog.items_with_tier(EnergyTier::High) {
        feedback.insert(item.title, -50);
    }

    let input = MoodInput {
        mood: Some(8),
        sleep_hours: Some(8),
        activity: Some(8),
        feeling_text: None,
    };

    for _ in 0..50 {
        let picks = recommender.recommend(&input, &feedback, &mut rng);
        assert_eq!(picks.len(), 3);
        let titles: HashSet<_> = picks.iter().map(|c| c.title.clone()).collect();
        assert_eq!(titles.len(), 3);
    }
}

#[test]
fn tier_selection_tracks_ratings_and_sleep() {
    assert_eq!(energy_tier(8, 8, 8), EnergyTier::High);
    assert_eq!(energy_tier(5, 8, 5), EnergyTier::Medium);
    assert_eq!(energy_tier(2, 8, 2), EnergyTier::Low);
    // Sleep deprivation forces low energy even with high ratings.
    assert_eq!(energy_tier(9, 3, 9), EnergyTier::Low);
}
