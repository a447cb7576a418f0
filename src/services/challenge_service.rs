use std::collections::HashMap;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::models::challenge::{
    ChallengeCatalog, ChallengeItem, DeliveryType, EnergyTier, RecommendedChallenge,
};
use crate::models::mood::MoodInput;

/// How many challenges an evaluation hands back, always.
pub const RECOMMENDATION_COUNT: usize = 3;

/// Sampling weight floor: even a heavily down-rated challenge keeps a
/// non-zero chance of being drawn.
const FEEDBACK_WEIGHT_FLOOR: f64 = 0.1;

/// Below this many hours of sleep the tier is low no matter what the
/// mood and activity say.
const SLEEP_DEPRIVATION_HOURS: i64 = 5;

const ANXIETY_KEYWORDS: &[&str] = &["불안", "걱정"];
const BOREDOM_KEYWORDS: &[&str] = &["지루", "심심"];

fn fallback_challenge() -> RecommendedChallenge {
    RecommendedChallenge {
        title: "가벼운 스트레칭 하기".to_string(),
        url: "#".to_string(),
        delivery: DeliveryType::Activity,
    }
}

fn rest_challenge() -> RecommendedChallenge {
    RecommendedChallenge {
        title: "잠시 눈 감고 휴식하기".to_string(),
        url: "#".to_string(),
        delivery: DeliveryType::Activity,
    }
}

fn breathing_item() -> ChallengeItem {
    ChallengeItem::new(
        "불안감을 다스리는 호흡법 따라하기",
        "https://www.youtube.com/results?search_query=불안+해소+호흡법",
        EnergyTier::Low,
    )
}

fn reading_item() -> ChallengeItem {
    ChallengeItem::new(
        "흥미로운 단편 소설 읽기",
        "https://brunch.co.kr/keyword/%EB%8B%A8%ED%8E%B8%EC%86%8C%EC%84%A4",
        EnergyTier::Medium,
    )
}

/// Known article/blog/search/map/recipe hosts; anything on them is a
/// plain website recommendation.
const WEBSITE_DOMAINS: &[&str] = &[
    "search.naver.com",
    "brunch.co.kr",
    "pinterest.co.kr",
    "goodnewsnetwork.org",
    "10000recipe.com",
    "google.com/maps",
];

/// Picks the day's challenges: energy-bucketed candidates, feedback-
/// weighted sampling without replacement, URL-derived delivery typing.
/// Randomness comes in as a parameter so callers can seed it.
pub struct ChallengeRecommender {
    catalog: Arc<ChallengeCatalog>,
}

impl ChallengeRecommender {
    pub fn new(catalog: Arc<ChallengeCatalog>) -> Self {
        Self { catalog }
    }

    /// Exactly RECOMMENDATION_COUNT items, deduplicated by full identity.
    /// Degrades to copies of the fallback item rather than failing;
    /// recommendation must never block the record-save transaction.
    pub fn recommend<R: Rng>(
        &self,
        input: &MoodInput,
        feedback_scores: &HashMap<String, i64>,
        rng: &mut R,
    ) -> Vec<RecommendedChallenge> {
        let (mood, sleep, activity) = input.normalized();
        let tier = energy_tier(mood, sleep, activity);

        let mut candidates = self.catalog.items_with_tier(tier);

        if let Some(extra) = text_triggered_item(input.feeling_text.as_deref()) {
            candidates.push(extra);
        }

        dedup_in_order(&mut candidates);

        if candidates.is_empty() {
            return vec![fallback_challenge(); RECOMMENDATION_COUNT];
        }

        let selected = weighted_sample(candidates, feedback_scores, rng);

        debug!(
            target: "app::challenge",
            tier = %tier,
            selected = selected.len(),
            "selected challenges"
        );

        let mut final_selection: Vec<RecommendedChallenge> = selected
            .into_iter()
            .take(RECOMMENDATION_COUNT)
            .map(|item| RecommendedChallenge {
                delivery: delivery_type_for_url(&item.url),
                title: item.title,
                url: item.url,
            })
            .collect();

        // Pathologically small catalog: pad with the rest item.
        while final_selection.len() < RECOMMENDATION_COUNT {
            final_selection.push(rest_challenge());
        }

        final_selection
    }
}

/// Energy bucket from the self-ratings. Sleep deprivation alone forces
/// low; the physiological constraint overrides self-reported mood.
pub fn energy_tier(mood: i64, sleep_hours: i64, activity: i64) -> EnergyTier {
    let avg = (mood + activity) as f64 / 2.0;

    if sleep_hours < SLEEP_DEPRIVATION_HOURS || avg < 4.0 {
        EnergyTier::Low
    } else if avg < 7.0 {
        EnergyTier::Medium
    } else {
        EnergyTier::High
    }
}

/// At most one augmentation; the anxiety check takes precedence.
fn text_triggered_item(feeling_text: Option<&str>) -> Option<ChallengeItem> {
    let text = feeling_text?;

    if ANXIETY_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        Some(breathing_item())
    } else if BOREDOM_KEYWORDS.iter().any(|keyword| text.contains(keyword)) {
        Some(reading_item())
    } else {
        None
    }
}

/// Deduplicate by full item identity, keeping first occurrence order.
fn dedup_in_order(items: &mut Vec<ChallengeItem>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

/// Weighted sampling without replacement: repeatedly draw one item
/// proportional to remaining weight, remove it, renormalize. Weight is
/// 1 + net feedback score, floored so nothing drops to zero probability.
fn weighted_sample<R: Rng>(
    candidates: Vec<ChallengeItem>,
    feedback_scores: &HashMap<String, i64>,
    rng: &mut R,
) -> Vec<ChallengeItem> {
    let mut pool = candidates;
    let mut weights: Vec<f64> = pool
        .iter()
        .map(|item| {
            let net = feedback_scores.get(&item.title).copied().unwrap_or(0);
            (1.0 + net as f64).max(FEEDBACK_WEIGHT_FLOOR)
        })
        .collect();

    let mut selected = Vec::with_capacity(RECOMMENDATION_COUNT);

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        // Unreachable with the weight floor and a non-empty pool; kept as
        // a safety net rather than removed.
        return pool
            .choose_multiple(rng, RECOMMENDATION_COUNT.min(pool.len()))
            .cloned()
            .collect();
    }

    while selected.len() < RECOMMENDATION_COUNT && !pool.is_empty() {
        let remaining: f64 = weights.iter().sum();
        if remaining <= 0.0 {
            break;
        }

        let mut draw = rng.gen::<f64>() * remaining;
        let mut chosen = pool.len() - 1;
        for (index, weight) in weights.iter().enumerate() {
            if draw < *weight {
                chosen = index;
                break;
            }
            draw -= weight;
        }

        selected.push(pool.remove(chosen));
        weights.remove(chosen);
    }

    // Pool smaller than the quota: fill uniformly from the remainder.
    while selected.len() < RECOMMENDATION_COUNT && !pool.is_empty() {
        let index = rng.gen_range(0..pool.len());
        selected.push(pool.remove(index));
    }

    selected
}

fn delivery_type_for_url(url: &str) -> DeliveryType {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        DeliveryType::VideoLink
    } else if WEBSITE_DOMAINS.iter().any(|domain| url.contains(domain)) {
        DeliveryType::Website
    } else if url == "#" {
        DeliveryType::Activity
    } else {
        DeliveryType::Other
    }
}
