use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use maumlog::error::{AppError, InferenceErrorCode};
use maumlog::models::mood::{SentimentLabel, SentimentResult};
use maumlog::services::sentiment_model::{
    HttpSentimentModel, SentimentModel, SentimentModelConfig,
};
use maumlog::services::sentiment_service::SentimentClassifier;
use serde_json::json;

fn config_for(server: &MockServer) -> SentimentModelConfig {
    SentimentModelConfig {
        base_url: server.base_url(),
        model: "kcbert-base-sentiment".to_string(),
        http_timeout: Duration::from_secs(2),
        max_input_len: 512,
    }
}

#[test]
fn predict_maps_argmax_and_keeps_probabilities() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/classify")
            .json_body_partial(r#"{"model": "kcbert-base-sentiment"}"#);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "probabilities": [0.05, 0.15, 0.80] }));
    });

    let model = HttpSentimentModel::try_new(&config_for(&server)).unwrap();
    let prediction = model.predict("키워드 없는 문장").unwrap();

    mock.assert();
    assert_eq!(prediction.label_index, 2);
    assert_eq!(prediction.probabilities, vec![0.05, 0.15, 0.80]);
}

#[test]
fn server_error_maps_to_model_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/classify");
        then.status(500);
    });

    let model = HttpSentimentModel::try_new(&config_for(&server)).unwrap();
    let error = model.predict("아무 문장").unwrap_err();

    match error {
        AppError::Inference {
            code,
            correlation_id,
            ..
        } => {
            assert_eq!(code, InferenceErrorCode::ModelUnavailable);
            assert!(correlation_id.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rate_limit_maps_to_rate_limited() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/classify");
        then.status(429);
    });

    let model = HttpSentimentModel::try_new(&config_for(&server)).unwrap();
    let error = model.predict("아무 문장").unwrap_err();

    assert!(matches!(
        error,
        AppError::Inference {
            code: InferenceErrorCode::RateLimited,
            ..
        }
    ));
}

#[test]
fn malformed_body_maps_to_invalid_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/classify");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "probabilities": [0.4, 0.6] }));
    });

    let model = HttpSentimentModel::try_new(&config_for(&server)).unwrap();
    let error = model.predict("아무 문장").unwrap_err();

    assert!(matches!(
        error,
        AppError::Inference {
            code: InferenceErrorCode::InvalidResponse,
            ..
        }
    ));
}

#[test]
fn empty_base_url_is_rejected_up_front() {
    let config = SentimentModelConfig {
        base_url: "  ".to_string(),
        model: "kcbert-base-sentiment".to_string(),
        http_timeout: Duration::from_secs(2),
        max_input_len: 512,
    };

    let error = HttpSentimentModel::try_new(&config).unwrap_err();
    assert!(matches!(
        error,
        AppError::Inference {
            code: InferenceErrorCode::MissingEndpoint,
            ..
        }
    ));
}

#[test]
fn classifier_degrades_to_neutral_when_the_model_is_down() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/classify");
        then.status(503);
    });

    let model = Arc::new(HttpSentimentModel::try_new(&config_for(&server)).unwrap());
    let classifier = SentimentClassifier::new(Some(model));

    let result = classifier.classify(Some("키워드가 전혀 없는 문장"));
    assert_eq!(result, SentimentResult::neutral_fallback());
}

#[test]
fn keyword_hit_never_reaches_the_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/classify");
        then.status(200)
            .json_body(json!({ "probabilities": [1.0, 0.0, 0.0] }));
    });

    let model = Arc::new(HttpSentimentModel::try_new(&config_for(&server)).unwrap());
    let classifier = SentimentClassifier::new(Some(model));

    let result = classifier.classify(Some("오늘 정말 행복했다"));
    assert_eq!(result.label, SentimentLabel::Positive);
    assert_eq!(mock.hits(), 0);
}

#[test]
fn long_text_is_truncated_before_the_request() {
    let server = MockServer::start();
    let truncated = "가".repeat(512);
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/classify").json_body(json!({
            "model": "kcbert-base-sentiment",
            "text": truncated,
        }));
        then.status(200)
            .json_body(json!({ "probabilities": [0.2, 0.5, 0.3] }));
    });

    let model = Arc::new(HttpSentimentModel::try_new(&config_for(&server)).unwrap());
    let classifier = SentimentClassifier::new(Some(model));

    let long_text = "가".repeat(2000);
    let result = classifier.classify(Some(&long_text));

    mock.assert();
    assert_eq!(result.label, SentimentLabel::Neutral);
}
