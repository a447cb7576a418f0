use std::sync::Arc;

use tracing::{debug, warn};

use crate::models::mood::{SentimentLabel, SentimentResult};
use crate::services::sentiment_model::SentimentModel;

/// Keyword safety layer in front of the statistical model. List order is
/// match priority; the lists are immutable process-wide data.
const POSITIVE_KEYWORDS: &[&str] = &[
    "행복", "기쁨", "즐거", "신나", "최고", "좋았", "훌륭", "알찬", "만족", "좋다", "괜찮",
    "뿌듯", "감사", "평온", "설렘", "기대", "상쾌", "편안", "활기", "재미있",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "슬픔", "우울", "화나", "짜증", "최악", "힘들", "괴로", "지침", "피곤", "안좋", "별로",
    "안 좋다", "속상", "실망", "불안", "걱정", "무기력", "답답", "귀찮", "외롭", "후회",
];

/// Guarded keywords whose literal substring also appears in a negated
/// phrase. A match on the keyword is suppressed when any listed phrase is
/// present. Only this hardcoded set is covered; other negated keywords
/// match their un-negated sentiment.
const NEGATION_GUARDS: &[(&str, &[&str])] = &[
    ("좋다", &["안 좋다", "않 좋다", "별로 좋다"]),
    ("좋았", &["안 좋았", "않 좋았"]),
];

/// Keywords at most this many encoded bytes long match only as whole
/// tokens, so very short keywords don't fire inside unrelated words.
/// Multibyte (Hangul) keywords always exceed this and take the substring
/// path, which is what lets 행복 match inside 행복했다.
const TOKEN_MATCH_MAX_LEN: usize = 2;

/// Hybrid sentiment classifier: exact and substring keyword matching in
/// fixed priority order, then the statistical model as fallback. Never
/// errors; every failure degrades to (Neutral, 0.5). Sentiment is an
/// auxiliary signal feeding the score, not the primary transaction.
pub struct SentimentClassifier {
    model: Option<Arc<dyn SentimentModel>>,
}

impl SentimentClassifier {
    pub fn new(model: Option<Arc<dyn SentimentModel>>) -> Self {
        Self { model }
    }

    /// Classifier without a statistical fallback; texts with no keyword
    /// hit come back neutral.
    pub fn keyword_only() -> Self {
        Self { model: None }
    }

    pub fn classify(&self, text: Option<&str>) -> SentimentResult {
        let text = match text {
            Some(value) if !value.trim().is_empty() => value,
            _ => return SentimentResult::neutral_fallback(),
        };

        // Matching is case-insensitive; callers keep the original casing
        // for storage.
        let lowered = text.to_lowercase();

        if let Some(result) = keyword_sentiment(&lowered) {
            debug!(target: "app::sentiment", label = %result.label, "keyword layer matched");
            return result;
        }

        match self.model_fallback(text) {
            Ok(result) => result,
            Err(err) => {
                warn!(target: "app::sentiment", error = %err, "model fallback failed, degrading to neutral");
                SentimentResult::neutral_fallback()
            }
        }
    }

    fn model_fallback(&self, text: &str) -> crate::error::AppResult<SentimentResult> {
        let model = match &self.model {
            Some(model) => model,
            None => return Ok(SentimentResult::neutral_fallback()),
        };

        let truncated: String = text.chars().take(model.max_input_len()).collect();
        let prediction = model.predict(&truncated)?;

        let label = SentimentLabel::from_index(prediction.label_index)
            .unwrap_or(SentimentLabel::Neutral);
        let confidence = prediction
            .probabilities
            .get(prediction.label_index)
            .copied()
            .unwrap_or(0.5)
            .clamp(0.0, 1.0);

        Ok(SentimentResult { label, confidence })
    }
}

fn keyword_sentiment(lowered: &str) -> Option<SentimentResult> {
    for keyword in POSITIVE_KEYWORDS {
        if *keyword == lowered {
            return Some(SentimentResult {
                label: SentimentLabel::Positive,
                confidence: 1.0,
            });
        }

        if keyword_matches(lowered, keyword) && !is_negated(keyword, lowered) {
            return Some(SentimentResult {
                label: SentimentLabel::Positive,
                confidence: 1.0,
            });
        }
    }

    for keyword in NEGATIVE_KEYWORDS {
        if *keyword == lowered {
            return Some(SentimentResult {
                label: SentimentLabel::Negative,
                confidence: 1.0,
            });
        }

        if keyword_matches(lowered, keyword) {
            return Some(SentimentResult {
                label: SentimentLabel::Negative,
                confidence: 1.0,
            });
        }
    }

    None
}

fn keyword_matches(text: &str, keyword: &str) -> bool {
    if keyword.len() <= TOKEN_MATCH_MAX_LEN {
        token_match(text, keyword)
    } else {
        text.contains(keyword)
    }
}

/// Whole-token match: the keyword delimited by spaces, including the
/// string boundaries.
fn token_match(text: &str, keyword: &str) -> bool {
    format!(" {text} ").contains(&format!(" {keyword} "))
}

fn is_negated(keyword: &str, text: &str) -> bool {
    NEGATION_GUARDS
        .iter()
        .find(|(guarded, _)| *guarded == keyword)
        .map(|(_, phrases)| phrases.iter().any(|phrase| text.contains(phrase)))
        .unwrap_or(false)
}
