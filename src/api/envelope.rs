use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use crate::constants::BODY_PREVIEW_CHARS;
use crate::error::{QueryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    Error,
}

/// Outer object wrapping every API response
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(rename = "errorType", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Shape of the `result` field of a query response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    Vector,
    Matrix,
    Scalar,
    String,
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultType::Vector => "vector",
            ResultType::Matrix => "matrix",
            ResultType::Scalar => "scalar",
            ResultType::String => "string",
        };
        f.write_str(name)
    }
}

/// `data` of an instant or range query. `result` is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryData {
    #[serde(rename = "resultType")]
    pub result_type: ResultType,
    pub result: Value,
}

/// One series returned by the series endpoint
pub type LabelSet = BTreeMap<String, String>;

/// Turn an HTTP status and body into the envelope's `data`.
///
/// Non-2xx statuses fail with the API error message when the body is an
/// error envelope and a body excerpt otherwise. A 2xx body must be an
/// envelope with status `success` and a `data` field.
pub fn decode_envelope(status: StatusCode, body: &str) -> Result<Value> {
    let parsed = serde_json::from_str::<ApiResponse>(body);

    if !status.is_success() {
        let message = match parsed {
            Ok(ApiResponse {
                error: Some(error),
                error_type,
                ..
            }) => match error_type {
                Some(error_type) => format!("{} ({})", error, error_type),
                None => error,
            },
            _ => body_preview(body),
        };
        return Err(QueryError::Http {
            status: status.as_u16(),
            message,
        });
    }

    let response = parsed.map_err(|e| {
        QueryError::Envelope(format!("{} in body: {}", e, body_preview(body)))
    })?;

    for warning in &response.warnings {
        warn!(warning = %warning, "query returned a warning");
    }

    if response.status == ApiStatus::Error {
        return Err(QueryError::Api {
            error_type: response.error_type.unwrap_or_else(|| "unknown".to_string()),
            error: response.error.unwrap_or_else(|| "unknown error".to_string()),
        });
    }

    response
        .data
        .ok_or_else(|| QueryError::Envelope("missing data field".to_string()))
}

/// Decode `data` into the type an endpoint returns
pub fn decode_data<T: serde::de::DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| QueryError::Envelope(e.to_string()))
}

fn body_preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    trimmed.chars().take(BODY_PREVIEW_CHARS).collect()
}
