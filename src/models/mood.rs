use serde::{Deserialize, Serialize};
use std::fmt;

/// Valid range for the mood and activity self-ratings.
pub const RATING_MIN: i64 = 0;
pub const RATING_MAX: i64 = 10;

const DEFAULT_MOOD: i64 = 5;
const DEFAULT_SLEEP_HOURS: i64 = 6;
const DEFAULT_ACTIVITY: i64 = 5;

/// Raw daily check-in. Absent numeric fields fall back to mid-range
/// defaults before any computation; missing input is never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodInput {
    #[serde(default)]
    pub mood: Option<i64>,
    #[serde(default)]
    pub sleep_hours: Option<i64>,
    #[serde(default)]
    pub activity: Option<i64>,
    #[serde(default)]
    pub feeling_text: Option<String>,
}

impl MoodInput {
    /// Defaulted and clamped (mood, sleep_hours, activity). Every numeric
    /// consumer goes through this so scoring and recommendation agree on
    /// what the user "said".
    pub fn normalized(&self) -> (i64, i64, i64) {
        let mood = self.mood.unwrap_or(DEFAULT_MOOD).clamp(RATING_MIN, RATING_MAX);
        let sleep = self.sleep_hours.unwrap_or(DEFAULT_SLEEP_HOURS).clamp(0, 24);
        let activity = self
            .activity
            .unwrap_or(DEFAULT_ACTIVITY)
            .clamp(RATING_MIN, RATING_MAX);
        (mood, sleep, activity)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
        }
    }

    /// Discrete contribution of the text signal to the composite score.
    pub fn text_points(&self) -> i64 {
        match self {
            SentimentLabel::Negative => 0,
            SentimentLabel::Neutral => 5,
            SentimentLabel::Positive => 10,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SentimentLabel::Negative),
            1 => Some(SentimentLabel::Neutral),
            2 => Some(SentimentLabel::Positive),
            _ => None,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SentimentLabel {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Negative" => Ok(SentimentLabel::Negative),
            "Neutral" => Ok(SentimentLabel::Neutral),
            "Positive" => Ok(SentimentLabel::Positive),
            other => Err(format!("unsupported sentiment label: {other}")),
        }
    }
}

/// Output of a single sentiment classification. Produced fresh per
/// evaluation and not persisted beyond the owning record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub confidence: f64,
}

impl SentimentResult {
    /// Safe default used for empty input and every degradation path.
    pub fn neutral_fallback() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            confidence: 0.5,
        }
    }
}

/// Per-term explanation of a composite score. Terms are preformatted for
/// display, rounded to two decimal places. Immutable once computed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub mood_term: String,
    pub sleep_term: String,
    pub activity_term: String,
    pub text_term: String,
    pub raw_total: String,
    pub cap_applied: bool,
}

/// Five ordinal status bands over the composite score. Band boundaries
/// are inclusive on the lower band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmotionStatus {
    #[serde(rename = "very poor")]
    VeryPoor,
    #[serde(rename = "poor")]
    Poor,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "positive")]
    Positive,
    #[serde(rename = "very positive")]
    VeryPositive,
}

impl EmotionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionStatus::VeryPoor => "very poor",
            EmotionStatus::Poor => "poor",
            EmotionStatus::Fair => "fair",
            EmotionStatus::Positive => "positive",
            EmotionStatus::VeryPositive => "very positive",
        }
    }
}

impl fmt::Display for EmotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EmotionStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "very poor" => Ok(EmotionStatus::VeryPoor),
            "poor" => Ok(EmotionStatus::Poor),
            "fair" => Ok(EmotionStatus::Fair),
            "positive" => Ok(EmotionStatus::Positive),
            "very positive" => Ok(EmotionStatus::VeryPositive),
            other => Err(format!("unsupported emotion status: {other}")),
        }
    }
}
