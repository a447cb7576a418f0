use once_cell::sync::Lazy;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::screening::{ScreeningOption, ScreeningQuestion, ScreeningResult};

const QUESTION_COUNT: usize = 9;
const MAX_OPTION_SCORE: i64 = 3;

/// PHQ-9 questionnaire. Fixed content, built once.
static QUESTIONS: Lazy<Vec<ScreeningQuestion>> = Lazy::new(|| {
    let texts = [
        "일 또는 여가 활동을 하는 데 흥미나 즐거움을 느끼지 못함",
        "기분이 가라앉거나, 우울하거나, 희망이 없음",
        "잠이 들거나 계속 잠을 자는 것이 어려움, 또는 잠을 너무 많이 잠",
        "피곤하다고 느끼거나 기운이 거의 없음",
        "입맛이 없거나 과식을 함",
        "자신을 부정적으로 봄, 혹은 자신이 실패자라고 느끼거나 자신 또는 가족을 실망시켰다고 느낌",
        "신문을 읽거나 TV 보는 것과 같은 일에 집중하는 것이 어려움",
        "다른 사람들이 주목할 정도로 너무 느리게 움직이거나 말을 함, 또는 반대로 평상시보다 많이 움직여서 너무 안절부절 못하거나 들떠 있음",
        "자신이 죽는 것이 더 낫다고 생각하거나 어떤 식으로든 자신을 해칠 것이라고 생각함",
    ];

    texts
        .iter()
        .enumerate()
        .map(|(index, text)| ScreeningQuestion {
            id: index as i64 + 1,
            text: (*text).to_string(),
            options: frequency_options(),
        })
        .collect()
});

fn frequency_options() -> Vec<ScreeningOption> {
    vec![
        ScreeningOption {
            text: "전혀 없음 (0점)".to_string(),
            score: 0,
        },
        ScreeningOption {
            text: "며칠 동안 (1점)".to_string(),
            score: 1,
        },
        ScreeningOption {
            text: "일주일 이상 (2점)".to_string(),
            score: 2,
        },
        ScreeningOption {
            text: "거의 매일 (3점)".to_string(),
            score: 3,
        },
    ]
}

pub fn questions() -> &'static [ScreeningQuestion] {
    &QUESTIONS
}

/// Score a completed questionnaire. The ninth item (self-harm) escalates
/// independently of the total.
pub fn score(answers: &[i64]) -> AppResult<ScreeningResult> {
    if answers.len() != QUESTION_COUNT {
        return Err(AppError::validation("9개 문항에 모두 응답해주세요"));
    }
    if answers
        .iter()
        .any(|answer| !(0..=MAX_OPTION_SCORE).contains(answer))
    {
        return Err(AppError::validation("응답 값이 올바르지 않습니다"));
    }

    let total_score: i64 = answers.iter().sum();
    let critical_item = answers[QUESTION_COUNT - 1] > 0;

    let mut message = if total_score <= 4 {
        format!("총점 {total_score}점. 우울 증상이 거의 없는 상태입니다.")
    } else if total_score <= 9 {
        format!("총점 {total_score}점. 가벼운 우울 증상이 있습니다. 생활 습관을 점검해보세요.")
    } else if total_score <= 14 {
        format!("총점 {total_score}점. 중간 정도의 우울 증상이 의심됩니다.")
    } else if total_score <= 19 {
        format!("총점 {total_score}점. 중등도 이상의 우울 증상이 의심됩니다.")
    } else {
        format!("총점 {total_score}점. 심한 우울 증상이 의심됩니다.")
    };

    let mut hospital_info = None;
    if critical_item {
        message.push_str(" 자해 관련 문항에 응답하셨습니다. 혼자 견디지 마시고 지금 바로 전문가와 상담하세요.");
        hospital_info = Some(
            "정신건강위기상담전화 (📞1577-0199, 24시간), 보건복지부 희망의 전화 (📞129)"
                .to_string(),
        );
    } else if total_score > 14 {
        message.push_str(" 가까운 정신건강의학과나 정신건강복지센터에 방문하여 상담받아보세요.");
    }

    info!(target: "app::screening", total_score, critical_item, "scored questionnaire");

    Ok(ScreeningResult {
        total_score,
        message,
        hospital_info,
    })
}
