use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tracing::{info, warn};

use crate::db::repositories::feedback_repository::FeedbackRepository;
use crate::db::repositories::record_repository::RecordRepository;
use crate::db::repositories::user_repository::UserRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::challenge::ChallengeCatalog;
use crate::models::feedback::{is_valid_rating, FeedbackEventInsert};
use crate::models::mood::MoodInput;
use crate::models::record::{DayEvaluation, JournalRecord, JournalRecordInsert};
use crate::services::challenge_service::ChallengeRecommender;
use crate::services::scoring_service::{classify_status, CompositeScorer};
use crate::services::sentiment_service::SentimentClassifier;

const RECORD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
const FEEDBACK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Facade over one day's evaluation: classify the text once, score it,
/// pick challenges against fresh feedback aggregates, persist the record
/// and hand back the wire-shaped result.
pub struct JournalService {
    db: DbPool,
    classifier: Arc<SentimentClassifier>,
    scorer: CompositeScorer,
    recommender: ChallengeRecommender,
}

impl JournalService {
    pub fn new(
        db: DbPool,
        classifier: Arc<SentimentClassifier>,
        catalog: Arc<ChallengeCatalog>,
    ) -> Self {
        let scorer = CompositeScorer::new(classifier.clone());
        let recommender = ChallengeRecommender::new(catalog);

        Self {
            db,
            classifier,
            scorer,
            recommender,
        }
    }

    pub fn evaluate_day(&self, username: &str, input: &MoodInput) -> AppResult<DayEvaluation> {
        let mut rng = rand::thread_rng();
        self.evaluate_day_with_rng(username, input, &mut rng)
    }

    /// Evaluate with caller-provided randomness, so tests can seed the
    /// challenge draw.
    pub fn evaluate_day_with_rng<R: Rng>(
        &self,
        username: &str,
        input: &MoodInput,
        rng: &mut R,
    ) -> AppResult<DayEvaluation> {
        let conn = self.db.get_connection()?;

        let user_id = UserRepository::find_id_by_username(&conn, username)?
            .ok_or_else(AppError::not_found)?;

        // Sentiment runs exactly once; its label feeds both the score and
        // the stored record.
        let sentiment = self.classifier.classify(input.feeling_text.as_deref());
        let composite = self.scorer.score_with_label(input, sentiment.label);
        let status = classify_status(composite.score);

        // A failed aggregate read softens to "no feedback yet"; the
        // weighting is a soft signal, not a correctness-critical path.
        let feedback_scores = FeedbackRepository::aggregate_scores(&conn).unwrap_or_else(|err| {
            warn!(target: "app::challenge", error = %err, "feedback aggregate unavailable, sampling unweighted");
            Default::default()
        });

        let challenges = self.recommender.recommend(input, &feedback_scores, rng);

        let score = round2(composite.score);
        let insert = JournalRecordInsert {
            user_id,
            date: Utc::now().format(RECORD_DATE_FORMAT).to_string(),
            score,
            status,
            text: input.feeling_text.clone(),
            recommended_challenges_json: serde_json::to_string(&challenges)?,
            feedback_given_json: "{}".to_string(),
        };

        let record_id = RecordRepository::insert(&conn, &insert)?;

        info!(
            target: "app::journal",
            record_id,
            user_id,
            score,
            status = %status,
            label = %sentiment.label,
            "evaluated and saved journal record"
        );

        Ok(DayEvaluation {
            record_id,
            score,
            text_emotion: sentiment.label,
            emotion_status: status,
            challenges,
            breakdown: composite.breakdown,
        })
    }

    /// A user's full journal history, date ascending.
    pub fn load_records(&self, username: &str) -> AppResult<Vec<JournalRecord>> {
        let conn = self.db.get_connection()?;

        let user_id = UserRepository::find_id_by_username(&conn, username)?
            .ok_or_else(AppError::not_found)?;

        RecordRepository::list_by_user(&conn, user_id)
    }

    /// Record one challenge rating: append the feedback event and merge
    /// the rating into the owning record's feedback map.
    pub fn record_feedback(
        &self,
        username: &str,
        record_id: i64,
        challenge_title: &str,
        rating: i64,
    ) -> AppResult<()> {
        if !is_valid_rating(rating) {
            return Err(AppError::validation("평가는 -1, 0, 1 중 하나여야 합니다"));
        }
        if challenge_title.trim().is_empty() {
            return Err(AppError::validation("챌린지 제목이 비어 있습니다"));
        }

        let conn = self.db.get_connection()?;

        let user_id = UserRepository::find_id_by_username(&conn, username)?
            .ok_or_else(AppError::not_found)?;

        // Ownership check: the record must belong to the rating user.
        let record = RecordRepository::find_for_user(&conn, record_id, user_id)?;

        let event = FeedbackEventInsert {
            user_id,
            record_id,
            challenge_title: challenge_title.to_string(),
            rating,
            timestamp: Utc::now().format(FEEDBACK_TIMESTAMP_FORMAT).to_string(),
        };
        FeedbackRepository::insert(&conn, &event)?;

        let mut feedback_given = record.feedback_given;
        feedback_given.insert(challenge_title.to_string(), rating);
        RecordRepository::update_feedback_json(
            &conn,
            record_id,
            &serde_json::to_string(&feedback_given)?,
        )?;

        info!(
            target: "app::journal",
            record_id,
            user_id,
            challenge_title,
            rating,
            "recorded challenge feedback"
        );

        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
