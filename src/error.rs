use std::fmt;

use rusqlite;
use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{error, warn};

pub type AppResult<T> = Result<T, AppError>;

/// Failure classes of the sentiment inference client. The classifier
/// degrades to a neutral result on any of these; the codes exist for
/// logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceErrorCode {
    MissingEndpoint,
    HttpTimeout,
    RateLimited,
    InvalidResponse,
    ModelUnavailable,
    Unknown,
}

impl InferenceErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            InferenceErrorCode::MissingEndpoint => "MISSING_ENDPOINT",
            InferenceErrorCode::HttpTimeout => "HTTP_TIMEOUT",
            InferenceErrorCode::RateLimited => "RATE_LIMITED",
            InferenceErrorCode::InvalidResponse => "INVALID_RESPONSE",
            InferenceErrorCode::ModelUnavailable => "MODEL_UNAVAILABLE",
            InferenceErrorCode::Unknown => "UNKNOWN_INFERENCE_ERROR",
        }
    }
}

impl fmt::Display for InferenceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("데이터베이스 오류: {message}")]
    Database { message: String },

    #[error("기록을 찾을 수 없습니다")]
    NotFound,

    #[error("기록 충돌: {message}")]
    Conflict { message: String },

    #[error("검증 실패: {message}")]
    Validation {
        message: String,
        details: Option<JsonValue>,
    },

    #[error("{message}")]
    Inference {
        code: InferenceErrorCode,
        message: String,
        correlation_id: Option<String>,
    },

    #[error("직렬화 오류: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, "validation error");
        AppError::Validation {
            message,
            details: None,
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: JsonValue) -> Self {
        let message = message.into();
        warn!(target: "app::validation", %message, details = %details, "validation error with details");
        AppError::Validation {
            message,
            details: Some(details),
        }
    }

    pub fn inference(code: InferenceErrorCode, message: impl Into<String>) -> Self {
        Self::inference_with_correlation(code, message, None)
    }

    pub fn inference_with_correlation(
        code: InferenceErrorCode,
        message: impl Into<String>,
        correlation_id: Option<&str>,
    ) -> Self {
        let message = message.into();
        let correlation = correlation_id.map(|value| value.to_string());
        match &correlation {
            Some(id) => {
                warn!(target: "app::sentiment::error", code = %code, correlation_id = %id, %message);
            }
            None => {
                warn!(target: "app::sentiment::error", code = %code, %message);
            }
        }

        AppError::Inference {
            code,
            message,
            correlation_id: correlation,
        }
    }

    pub fn inference_code(&self) -> Option<InferenceErrorCode> {
        match self {
            AppError::Inference { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "app::conflict", %message, "conflict error");
        AppError::Conflict { message }
    }

    pub fn not_found() -> Self {
        warn!(target: "app::database", "resource not found");
        AppError::NotFound
    }

    pub fn database(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::database", %message, "database error");
        AppError::Database { message }
    }

    pub fn other(message: impl Into<String>) -> Self {
        let message = message.into();
        error!(target: "app::other", %message, "other error");
        AppError::Other(message)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(error: rusqlite::Error) -> Self {
        use rusqlite::Error::{QueryReturnedNoRows, SqliteFailure};
        use rusqlite::ErrorCode;

        match &error {
            QueryReturnedNoRows => AppError::not_found(),
            SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                AppError::conflict("고유 제약 조건을 위반했습니다")
            }
            _ => {
                error!(target: "app::database", error = ?error, "sqlite error");
                AppError::database(error.to_string())
            }
        }
    }
}
