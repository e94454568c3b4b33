use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

/// Parse `Key: Value` strings into a HeaderMap, skipping malformed entries.
///
/// Repeated keys are appended rather than replaced.
pub fn parse_headers(headers: &[String]) -> HeaderMap {
    let mut header_map = HeaderMap::new();
    for header_str in headers {
        let Some((key, value)) = header_str.split_once(':') else {
            warn!(header = %header_str, "invalid header format, expected 'Key: Value'");
            continue;
        };
        let key = key.trim();
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(value.trim()),
        ) {
            (Ok(name), Ok(value)) => {
                header_map.append(name, value);
            }
            (Err(_), _) => warn!(header = %key, "invalid header name"),
            (_, Err(_)) => warn!(header = %key, "invalid header value"),
        }
    }
    header_map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers() {
        let headers = vec![
            "Authorization: Bearer abc".to_string(),
            "X-Scope-OrgID:tenant-1".to_string(),
        ];
        let header_map = parse_headers(&headers);
        assert_eq!(header_map.len(), 2);
        assert_eq!(header_map.get("Authorization").unwrap(), "Bearer abc");
        assert_eq!(header_map.get("X-Scope-OrgID").unwrap(), "tenant-1");
    }

    #[test]
    fn test_parse_headers_repeated_key() {
        let headers = vec!["X-Tag: a".to_string(), "X-Tag: b".to_string()];
        let header_map = parse_headers(&headers);
        assert_eq!(header_map.get_all("X-Tag").iter().count(), 2);
    }

    #[test]
    fn test_parse_headers_invalid() {
        let headers = vec!["Invalid Header".to_string(), "Bad Name: x".to_string()];
        let header_map = parse_headers(&headers);
        assert_eq!(header_map.len(), 0);
    }
}
