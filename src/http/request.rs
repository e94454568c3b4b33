use std::collections::BTreeMap;

use tracing::warn;
use url::Url;

use crate::constants::{API_PREFIX, RESERVED_RANGE_PARAMS};
use crate::error::{QueryError, Result};

/// Query string parameters, in the order they are sent
pub type QueryParams = Vec<(String, String)>;

/// Append API path segments to the server base URL.
///
/// Any path prefix already on the base (`http://host/prometheus`) is kept;
/// a trailing slash on it is dropped. Segments are percent-encoded.
pub fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            QueryError::InvalidArgument(format!("server URL '{}' cannot be used as a base URL", base))
        })?;
        path.pop_if_empty();
        path.extend(API_PREFIX.iter().chain(segments.iter()));
    }
    Ok(url)
}

/// Build the full request URL for an API call
pub fn build_query_url(base: &Url, segments: &[&str], params: &[(String, String)]) -> Result<Url> {
    let mut url = endpoint_url(base, segments)?;
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    Ok(url)
}

/// Parse `key=value` strings into extra query parameters, skipping malformed entries
pub fn parse_params(params: &[String]) -> BTreeMap<String, String> {
    let mut parsed = BTreeMap::new();
    for param in params {
        match param.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                parsed.insert(key.trim().to_string(), value.to_string());
            }
            _ => warn!(param = %param, "invalid parameter format, expected 'key=value'"),
        }
    }
    parsed
}

/// Append caller-supplied parameters to a range query.
///
/// Names owned by the range endpoint are never overridden.
pub fn merge_extra_params(params: &mut QueryParams, extra: &BTreeMap<String, String>) {
    for (key, value) in extra {
        if RESERVED_RANGE_PARAMS.contains(&key.as_str()) {
            warn!(param = %key, "ignoring extra parameter that would override a range query parameter");
            continue;
        }
        params.push((key.clone(), value.clone()));
    }
}

/// Format a request as a single line for logs
pub fn format_request_line(url: &Url) -> String {
    let path_and_query = if let Some(query) = url.query() {
        format!("{}?{}", url.path(), query)
    } else {
        url.path().to_string()
    };
    format!(
        "GET {} (host: {})",
        path_and_query,
        url.host_str().unwrap_or("")
    )
}
