use serde::{Deserialize, Serialize};
use std::fmt;

/// How demanding a challenge is, derived from self-reported mood, sleep
/// and activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyTier {
    Low,
    Medium,
    High,
}

impl EnergyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyTier::Low => "low",
            EnergyTier::Medium => "medium",
            EnergyTier::High => "high",
        }
    }
}

impl fmt::Display for EnergyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EnergyTier {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "low" => Ok(EnergyTier::Low),
            "medium" => Ok(EnergyTier::Medium),
            "high" => Ok(EnergyTier::High),
            other => Err(format!("unsupported energy tier: {other}")),
        }
    }
}

/// Presentation channel of a recommended challenge, derived from its URL
/// shape at selection time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeliveryType {
    #[serde(rename = "video-link")]
    VideoLink,
    #[serde(rename = "website")]
    Website,
    #[serde(rename = "activity")]
    Activity,
    #[serde(rename = "other")]
    Other,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::VideoLink => "video-link",
            DeliveryType::Website => "website",
            DeliveryType::Activity => "activity",
            DeliveryType::Other => "other",
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry. Identity for deduplication is the full triple
/// (title, url, energy); the title alone keys feedback aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeItem {
    pub title: String,
    pub url: String,
    pub energy: EnergyTier,
}

impl ChallengeItem {
    pub fn new(title: &str, url: &str, energy: EnergyTier) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            energy,
        }
    }
}

/// Challenge as delivered to the user. Serialized with the wire keys
/// `title` / `url` / `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedChallenge {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub delivery: DeliveryType,
}

/// Process-wide read-only challenge catalog, organized into the three
/// source categories. Built once at startup and injected; never mutated.
#[derive(Debug, Clone)]
pub struct ChallengeCatalog {
    pub video: Vec<ChallengeItem>,
    pub activity: Vec<ChallengeItem>,
    pub creative: Vec<ChallengeItem>,
}

impl ChallengeCatalog {
    /// Items across all categories matching the given tier, in catalog
    /// order (video, activity, creative).
    pub fn items_with_tier(&self, tier: EnergyTier) -> Vec<ChallengeItem> {
        self.video
            .iter()
            .chain(self.activity.iter())
            .chain(self.creative.iter())
            .filter(|item| item.energy == tier)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.video.is_empty() && self.activity.is_empty() && self.creative.is_empty()
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        use EnergyTier::{High, Low, Medium};

        let item = ChallengeItem::new;

        Self {
            video: vec![
                item(
                    "5분 명상: 불안과 스트레스 해소",
                    "https://www.youtube.com/results?search_query=5분+명상+불안+해소",
                    Low,
                ),
                item(
                    "지브리 스튜디오 피아노 음악",
                    "https://www.youtube.com/results?search_query=지브리+피아노+모음",
                    Low,
                ),
                item(
                    "마음이 편안해지는 자연 소리 (ASMR)",
                    "https://www.youtube.com/results?search_query=자연+소리+ASMR",
                    Low,
                ),
                item(
                    "심신 안정을 위한 힐링 주파수",
                    "https://www.youtube.com/results?search_query=힐링+주파수",
                    Low,
                ),
                item(
                    "기분 전환을 위한 웃긴 동물 영상",
                    "https://www.youtube.com/results?search_query=웃긴+동물+영상+모음",
                    Medium,
                ),
                item(
                    "활력을 주는 아침 스트레칭 가이드",
                    "https://www.youtube.com/results?search_query=아침+활력+스트레칭",
                    Medium,
                ),
                item(
                    "방구석 콘서트: 신나는 팝송 모음",
                    "https://www.youtube.com/results?search_query=신나는+팝송+모음",
                    Medium,
                ),
                item(
                    "짧고 굵은 동기부여 영상",
                    "https://www.youtube.com/results?search_query=짧은+동기부여+영상",
                    Medium,
                ),
                item(
                    "TED 강연: 변화와 성장의 이야기",
                    "https://www.youtube.com/results?search_query=TED+강연+변화+성장",
                    High,
                ),
                item(
                    "집에서 즐기는 줌바 댄스",
                    "https://www.youtube.com/results?search_query=집에서+줌바댄스",
                    High,
                ),
                item(
                    "고강도 홈트레이닝 (타바타)",
                    "https://www.youtube.com/results?search_query=타바타+운동",
                    High,
                ),
                item(
                    "세상을 바꾸는 시간 15분 (세바시)",
                    "https://www.youtube.com/results?search_query=세바시+레전드",
                    High,
                ),
            ],
            activity: vec![
                item("창문 열고 5번 깊게 숨쉬기", "#", Low),
                item("따뜻한 차나 물 한 잔 마시기", "#", Low),
                item("눈 감고 3분간 아무 생각 안 하기", "#", Low),
                item("반려식물 물 주기 및 잎 닦아주기", "#", Low),
                item("좋아하는 향수나 캔들 향 맡기", "#", Low),
                item("가벼운 15분 동네 산책하기", "#", Medium),
                item("좋아하는 노래 크게 틀고 따라부르기", "#", Medium),
                item("책상 위나 지갑 정리하기", "#", Medium),
                item("스마트폰 사진첩 정리하며 추억 여행", "#", Medium),
                item(
                    "간단한 셀프 마사지 (목, 어깨)",
                    "https://www.youtube.com/results?search_query=셀프+목+어깨+마사지",
                    Medium,
                ),
                item("오랜만에 친구에게 전화 걸어 수다 떨기", "#", High),
                item("방 전체 청소기 돌리고 환기하기", "#", High),
                item(
                    "플랭크 1분 도전하기",
                    "https://www.youtube.com/results?search_query=올바른+플랭크+자세",
                    High,
                ),
                item("가까운 공원이나 뒷산 다녀오기", "#", High),
                item(
                    "새로운 요리 레시피 도전해보기",
                    "https://www.10000recipe.com/",
                    High,
                ),
            ],
            creative: vec![
                item("지금 드는 감정 3단어로 표현해보기", "#", Low),
                item(
                    "좋아하는 시 한 편 필사하기",
                    "https://search.naver.com/search.naver?query=좋은+시+추천",
                    Low,
                ),
                item("내일의 할 일 목록(To-Do List) 작성하기", "#", Low),
                item("감사일기: 오늘 고마웠던 것 3가지 쓰기", "#", Low),
                item(
                    "컬러링북이나 만다라 색칠하기",
                    "https://search.naver.com/search.naver?query=무료+만다라+도안",
                    Medium,
                ),
                item("스마트폰으로 하늘이나 풍경 사진 찍기", "#", Medium),
                item("나만의 플레이리스트 만들기", "#", Medium),
                item(
                    "블로그에 오늘의 일기 남기기",
                    "https://section.blog.naver.com/",
                    Medium,
                ),
                item(
                    "그림 그리기 (드로잉, 수채화 등)",
                    "https://www.youtube.com/results?search_query=초보+드로잉+강좌",
                    High,
                ),
                item(
                    "DIY 키트나 종이접기 해보기",
                    "https://www.youtube.com/results?search_query=종이접기",
                    High,
                ),
                item(
                    "나중에 가고 싶은 여행 계획 짜보기",
                    "https://www.google.com/maps",
                    High,
                ),
                item("짧은 소설이나 에세이 써보기", "#", High),
            ],
        }
    }
}
