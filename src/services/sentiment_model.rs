use std::env;
use std::time::{Duration, Instant};

use reqwest::StatusCode;
use serde_json::{json, Value as JsonValue};
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, AppResult, InferenceErrorCode};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8600";
const DEFAULT_MODEL: &str = "kcbert-base-sentiment";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_INPUT_LEN: usize = 512;

/// Opaque 3-class sequence classifier. The engine never assumes a
/// specific runtime behind this; any local or remote inference stack can
/// implement it.
pub trait SentimentModel: Send + Sync {
    /// Class probabilities for `text`, already truncated by the caller to
    /// `max_input_len`. Index order is fixed: 0 negative, 1 neutral,
    /// 2 positive.
    fn predict(&self, text: &str) -> AppResult<ModelPrediction>;

    /// Maximum input length in characters; classification truncates to
    /// this to bound inference latency.
    fn max_input_len(&self) -> usize {
        DEFAULT_MAX_INPUT_LEN
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrediction {
    pub label_index: usize,
    pub probabilities: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct SentimentModelConfig {
    pub base_url: String,
    pub model: String,
    pub http_timeout: Duration,
    pub max_input_len: usize,
}

impl SentimentModelConfig {
    pub fn from_env() -> Self {
        let base_url =
            env::var("MAUMLOG_SENTIMENT_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model =
            env::var("MAUMLOG_SENTIMENT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let http_timeout = env::var("MAUMLOG_SENTIMENT_TIMEOUT_MS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(DEFAULT_TIMEOUT_MS));

        Self {
            base_url,
            model,
            http_timeout,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

/// Sentiment model served over HTTP by a local inference host. The
/// client is blocking on purpose: classification happens at most once
/// per evaluation, inside a synchronous request path.
#[derive(Debug)]
pub struct HttpSentimentModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    max_input_len: usize,
}

impl HttpSentimentModel {
    pub fn try_new(config: &SentimentModelConfig) -> AppResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(AppError::inference(
                InferenceErrorCode::MissingEndpoint,
                "감성 분석 서버 주소가 설정되지 않았습니다",
            ));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|err| {
                AppError::inference(
                    InferenceErrorCode::Unknown,
                    format!("감성 분석 HTTP 클라이언트 초기화 실패: {err}"),
                )
            })?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        let endpoint = format!("{base_url}/v1/classify");

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            max_input_len: config.max_input_len,
        })
    }

    fn map_http_error(status: StatusCode, correlation_id: &str) -> AppError {
        let code = if status == StatusCode::TOO_MANY_REQUESTS {
            InferenceErrorCode::RateLimited
        } else if status.is_server_error() {
            InferenceErrorCode::ModelUnavailable
        } else {
            InferenceErrorCode::Unknown
        };

        AppError::inference_with_correlation(
            code,
            format!("감성 분석 서버가 비정상 상태를 반환했습니다: {status}"),
            Some(correlation_id),
        )
    }
}

impl SentimentModel for HttpSentimentModel {
    fn predict(&self, text: &str) -> AppResult<ModelPrediction> {
        let correlation_id = Uuid::new_v4().to_string();

        debug!(
            target: "app::sentiment::http",
            correlation_id = %correlation_id,
            model = %self.model,
            chars = text.chars().count(),
            "invoking sentiment model"
        );

        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "model": self.model, "text": text }))
            .send()
            .map_err(|err| {
                let code = if err.is_timeout() {
                    InferenceErrorCode::HttpTimeout
                } else {
                    InferenceErrorCode::ModelUnavailable
                };
                AppError::inference_with_correlation(
                    code,
                    format!("감성 분석 서버 요청 실패: {err}"),
                    Some(correlation_id.as_str()),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::map_http_error(status, &correlation_id));
        }

        let body: JsonValue = response.json().map_err(|err| {
            AppError::inference_with_correlation(
                InferenceErrorCode::InvalidResponse,
                format!("감성 분석 응답 파싱 실패: {err}"),
                Some(correlation_id.as_str()),
            )
        })?;

        let probabilities: Vec<f64> = body
            .get("probabilities")
            .and_then(|value| value.as_array())
            .map(|values| values.iter().filter_map(JsonValue::as_f64).collect())
            .unwrap_or_default();

        if probabilities.len() != 3 {
            return Err(AppError::inference_with_correlation(
                InferenceErrorCode::InvalidResponse,
                "감성 분석 응답에 3개 클래스 확률이 없습니다",
                Some(correlation_id.as_str()),
            ));
        }

        let label_index = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(index, _)| index)
            .unwrap_or(1);

        debug!(
            target: "app::sentiment::http",
            correlation_id = %correlation_id,
            latency_ms = start.elapsed().as_millis() as u64,
            label_index,
            "sentiment model responded"
        );

        Ok(ModelPrediction {
            label_index,
            probabilities,
        })
    }

    fn max_input_len(&self) -> usize {
        self.max_input_len
    }
}
