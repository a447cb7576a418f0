use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningOption {
    pub text: String,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningQuestion {
    pub id: i64,
    pub text: String,
    pub options: Vec<ScreeningOption>,
}

/// Scored PHQ-9 style questionnaire outcome. `hospital_info` is set when
/// the total or the critical item warrants a referral.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningResult {
    pub total_score: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_info: Option<String>,
}
