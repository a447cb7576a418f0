use std::sync::Arc;

use tracing::debug;

use crate::models::mood::{
    EmotionStatus, MoodInput, ScoreBreakdown, SentimentLabel,
};
use crate::services::sentiment_service::SentimentClassifier;

const MOOD_WEIGHT: f64 = 0.35;
const SLEEP_WEIGHT: f64 = 0.15;
const ACTIVITY_WEIGHT: f64 = 0.20;
const TEXT_WEIGHT: f64 = 0.30;

/// Sleep below this counts as this many hours; scoring never rewards or
/// punishes below the floor.
const MIN_SLEEP_HOURS: i64 = 4;

/// Ceiling for a day whose text reads clearly negative, whatever the
/// numeric self-ratings say.
const NEGATIVE_SCORE_CAP: f64 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeScore {
    pub score: f64,
    pub label: SentimentLabel,
    pub breakdown: ScoreBreakdown,
}

/// Blends the numeric self-ratings and the text sentiment into a single
/// 0–10 wellbeing score with a per-term explanation.
pub struct CompositeScorer {
    classifier: Arc<SentimentClassifier>,
}

impl CompositeScorer {
    pub fn new(classifier: Arc<SentimentClassifier>) -> Self {
        Self { classifier }
    }

    /// Classify the text, then score. Missing numeric inputs default and
    /// clamp silently; this never errors.
    pub fn score(&self, input: &MoodInput) -> CompositeScore {
        let sentiment = self.classifier.classify(input.feeling_text.as_deref());
        self.score_with_label(input, sentiment.label)
    }

    /// Score with an already-classified label, so evaluate-day runs the
    /// classifier exactly once.
    pub fn score_with_label(&self, input: &MoodInput, label: SentimentLabel) -> CompositeScore {
        let (mood, sleep, activity) = input.normalized();
        let sleep_adj = sleep.max(MIN_SLEEP_HOURS);
        let text_points = label.text_points();

        let mood_w = mood as f64 * MOOD_WEIGHT;
        let sleep_w = sleep_adj as f64 * SLEEP_WEIGHT;
        let activity_w = activity as f64 * ACTIVITY_WEIGHT;
        let text_w = text_points as f64 * TEXT_WEIGHT;

        let raw_total = mood_w + sleep_w + activity_w + text_w;

        let mut combined = raw_total;
        let mut cap_applied = false;
        if label == SentimentLabel::Negative && combined > NEGATIVE_SCORE_CAP {
            combined = NEGATIVE_SCORE_CAP;
            cap_applied = true;
        }

        let score = combined.clamp(0.0, 10.0);

        let breakdown = ScoreBreakdown {
            mood_term: format!("{mood}점 × 35% = {mood_w:.2}"),
            sleep_term: format!("{sleep_adj}시간(보정) × 15% = {sleep_w:.2}"),
            activity_term: format!("{activity}점 × 20% = {activity_w:.2}"),
            text_term: format!("{label}({text_points}점) × 30% = {text_w:.2}"),
            raw_total: format!("{raw_total:.2}"),
            cap_applied,
        };

        debug!(
            target: "app::scoring",
            score,
            label = %label,
            cap_applied,
            "computed composite score"
        );

        CompositeScore {
            score,
            label,
            breakdown,
        }
    }
}

/// Status band for a composite score. Boundaries are inclusive on the
/// lower band: 3.0 is still "very poor", 7.0 still "fair".
pub fn classify_status(score: f64) -> EmotionStatus {
    if score <= 3.0 {
        EmotionStatus::VeryPoor
    } else if score <= 5.0 {
        EmotionStatus::Poor
    } else if score <= 7.0 {
        EmotionStatus::Fair
    } else if score <= 8.5 {
        EmotionStatus::Positive
    } else {
        EmotionStatus::VeryPositive
    }
}
