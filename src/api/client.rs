use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::api::envelope::{LabelSet, QueryData, decode_data, decode_envelope};
use crate::constants::{
    LABEL_PATH, LABEL_VALUES_PATH, QUERY_PATH, QUERY_RANGE_PATH, SERIES_PATH,
};
use crate::error::{QueryError, Result};
use crate::http::{QueryParams, build_query_url, format_request_line, merge_extra_params};
use crate::utils::{format_step, parse_server_url};

/// Client for the query endpoints of one Prometheus-compatible server.
///
/// Holds the HTTP client it was given and the normalized base URL. Every
/// call is a single GET with no retries.
#[derive(Debug, Clone)]
pub struct QueryClient {
    http: Client,
    base: Url,
}

impl QueryClient {
    /// Create a client for `server`, adding an http scheme when it has none
    pub fn new(http: Client, server: &str) -> Result<Self> {
        let base = parse_server_url(server)?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Evaluate `query` at `time`. An empty time lets the server use its current time.
    pub async fn instant(&self, query: &str, time: &str) -> Result<QueryData> {
        let mut params = vec![("query".to_string(), query.to_string())];
        if !time.is_empty() {
            params.push(("time".to_string(), time.to_string()));
        }
        let data = self.get(&[QUERY_PATH], &params).await?;
        decode_data(data)
    }

    /// Evaluate `query` from `start` to `end` every `step`.
    ///
    /// `extra` parameters are appended after the range parameters and never
    /// replace them.
    pub async fn range(
        &self,
        query: &str,
        start: &str,
        end: &str,
        step: Duration,
        extra: &BTreeMap<String, String>,
    ) -> Result<QueryData> {
        let mut params = vec![
            ("query".to_string(), query.to_string()),
            ("start".to_string(), start.to_string()),
            ("end".to_string(), end.to_string()),
            ("step".to_string(), format_step(step)),
        ];
        merge_extra_params(&mut params, extra);
        let data = self.get(&[QUERY_RANGE_PATH], &params).await?;
        decode_data(data)
    }

    /// List the series matching any of `matchers`
    pub async fn series(&self, matchers: &[String], start: &str, end: &str) -> Result<Vec<LabelSet>> {
        if matchers.is_empty() {
            return Err(QueryError::InvalidArgument(
                "at least one series selector is required".to_string(),
            ));
        }
        let mut params: QueryParams = matchers
            .iter()
            .map(|matcher| ("match[]".to_string(), matcher.clone()))
            .collect();
        push_bounds(&mut params, start, end);
        let data = self.get(&[SERIES_PATH], &params).await?;
        decode_data(data)
    }

    /// List the values of label `name`
    pub async fn label_values(&self, name: &str, start: &str, end: &str) -> Result<Vec<String>> {
        if name.is_empty() {
            return Err(QueryError::InvalidArgument(
                "label name must not be empty".to_string(),
            ));
        }
        let mut params = QueryParams::new();
        push_bounds(&mut params, start, end);
        let data = self
            .get(&[LABEL_PATH, name, LABEL_VALUES_PATH], &params)
            .await?;
        decode_data(data)
    }

    async fn get(&self, segments: &[&str], params: &[(String, String)]) -> Result<Value> {
        let url = build_query_url(&self.base, segments, params)?;
        debug!(request = %format_request_line(&url), "sending request");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        decode_envelope(status, &body)
    }
}

fn push_bounds(params: &mut QueryParams, start: &str, end: &str) {
    if !start.is_empty() {
        params.push(("start".to_string(), start.to_string()));
    }
    if !end.is_empty() {
        params.push(("end".to_string(), end.to_string()));
    }
}
