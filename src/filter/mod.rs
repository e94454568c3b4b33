use regex::Regex;

use crate::error::{QueryError, Result};

/// Substring and regex criteria applied to label values before printing
#[derive(Debug, Clone, Default)]
pub struct LabelFilter {
    filter_string: Option<String>,
    filter_regex: Option<Regex>,
}

impl LabelFilter {
    pub fn new(filter_string: Option<String>, filter_regex: Option<&str>) -> Result<Self> {
        let filter_regex = filter_regex
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    QueryError::InvalidArgument(format!(
                        "invalid regex for --filter-regex: {}",
                        e
                    ))
                })
            })
            .transpose()?;
        Ok(Self {
            filter_string,
            filter_regex,
        })
    }

    /// Check if a value passes every configured criterion
    pub fn matches(&self, value: &str) -> bool {
        // Filter by substring
        if let Some(filter_str) = &self.filter_string
            && !value.contains(filter_str.as_str())
        {
            return false;
        }

        // Filter by regex
        if let Some(re) = &self.filter_regex
            && !re.is_match(value)
        {
            return false;
        }

        true
    }

    pub fn apply(&self, values: Vec<String>) -> Vec<String> {
        values.into_iter().filter(|v| self.matches(v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Vec<String> {
        vec![
            "api-server".to_string(),
            "node-exporter".to_string(),
            "prometheus".to_string(),
        ]
    }

    #[test]
    fn test_filter_by_string() {
        let filter = LabelFilter::new(Some("exporter".to_string()), None).unwrap();
        assert_eq!(filter.apply(values()), vec!["node-exporter".to_string()]);
    }

    #[test]
    fn test_filter_by_regex() {
        let filter = LabelFilter::new(None, Some("^(api|prom)")).unwrap();
        assert_eq!(
            filter.apply(values()),
            vec!["api-server".to_string(), "prometheus".to_string()]
        );
    }

    #[test]
    fn test_filter_combined() {
        let filter = LabelFilter::new(Some("server".to_string()), Some("^api")).unwrap();
        assert!(filter.matches("api-server"));
        assert!(!filter.matches("api-gateway"));
        assert!(!filter.matches("web-server"));
    }

    #[test]
    fn test_no_filter() {
        assert_eq!(LabelFilter::default().apply(values()), values());
    }

    #[test]
    fn test_invalid_regex() {
        assert!(matches!(
            LabelFilter::new(None, Some("(unclosed")),
            Err(QueryError::InvalidArgument(_))
        ));
    }
}
