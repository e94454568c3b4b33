use colored::*;
use serde_json::Value;

use crate::api::{LabelSet, ResultType};
use crate::error::{QueryError, Result};

const METRIC_NAME_LABEL: &str = "__name__";

/// One `[timestamp, value]` pair of a query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub timestamp: String,
    pub value: String,
}

/// A labelled series with its samples. Scalars and strings decode to a
/// single unlabelled series holding one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub metric: LabelSet,
    pub samples: Vec<Sample>,
}

/// Decode a raw `result` payload into series
pub fn decode_series(result_type: ResultType, result: &Value) -> Result<Vec<Series>> {
    match result_type {
        ResultType::Scalar | ResultType::String => Ok(vec![Series {
            metric: LabelSet::new(),
            samples: vec![decode_sample(result)?],
        }]),
        ResultType::Vector => as_array(result, "vector")?
            .iter()
            .map(|item| -> Result<Series> {
                let point = item
                    .get("value")
                    .or_else(|| item.get("histogram"))
                    .ok_or_else(|| malformed("vector sample without a value"))?;
                Ok(Series {
                    metric: decode_metric(item.get("metric"))?,
                    samples: vec![decode_sample(point)?],
                })
            })
            .collect(),
        ResultType::Matrix => as_array(result, "matrix")?
            .iter()
            .map(|item| -> Result<Series> {
                let mut samples = Vec::new();
                for key in ["values", "histograms"] {
                    if let Some(points) = item.get(key) {
                        for point in as_array(points, key)? {
                            samples.push(decode_sample(point)?);
                        }
                    }
                }
                Ok(Series {
                    metric: decode_metric(item.get("metric"))?,
                    samples,
                })
            })
            .collect(),
    }
}

fn decode_metric(metric: Option<&Value>) -> Result<LabelSet> {
    let Some(metric) = metric else {
        return Ok(LabelSet::new());
    };
    let object = metric
        .as_object()
        .ok_or_else(|| malformed("metric is not an object"))?;
    object
        .iter()
        .map(|(name, value)| -> Result<(String, String)> {
            let value = value
                .as_str()
                .ok_or_else(|| malformed("label value is not a string"))?;
            Ok((name.clone(), value.to_string()))
        })
        .collect()
}

fn decode_sample(point: &Value) -> Result<Sample> {
    let pair = as_array(point, "sample")?;
    let [timestamp, value] = pair.as_slice() else {
        return Err(malformed("sample is not a [timestamp, value] pair"));
    };
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    Ok(Sample {
        timestamp: timestamp.to_string(),
        value,
    })
}

fn as_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| malformed(&format!("{} is not an array", what)))
}

fn malformed(message: &str) -> QueryError {
    QueryError::Envelope(message.to_string())
}

/// Render a label set the way PromQL writes a selector: `name{a="1", b="2"}`
pub fn format_metric(metric: &LabelSet) -> String {
    let name = metric.get(METRIC_NAME_LABEL).map(String::as_str).unwrap_or("");
    let labels: Vec<String> = metric
        .iter()
        .filter(|(label, _)| label.as_str() != METRIC_NAME_LABEL)
        .map(|(label, value)| format!("{}=\"{}\"", label, escape_label_value(value)))
        .collect();

    if labels.is_empty() && !name.is_empty() {
        return name.to_string();
    }
    format!("{}{{{}}}", name, labels.join(", "))
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Render a query result as PromQL-style text, one line per sample
pub fn format_promql_output(result_type: ResultType, series: &[Series], colored: bool) -> String {
    let paint_metric = |metric: &LabelSet| {
        let text = format_metric(metric);
        if colored { text.cyan().to_string() } else { text }
    };
    let paint_sample = |sample: &Sample| {
        let value = if colored {
            sample.value.green().to_string()
        } else {
            sample.value.clone()
        };
        format!("{} @[{}]", value, sample.timestamp)
    };

    let mut output = String::new();
    match result_type {
        ResultType::Scalar => {
            for sample in series.iter().flat_map(|s| &s.samples) {
                output.push_str(&format!("scalar: {}\n", paint_sample(sample)));
            }
        }
        ResultType::String => {
            for sample in series.iter().flat_map(|s| &s.samples) {
                let quoted = Sample {
                    timestamp: sample.timestamp.clone(),
                    value: format!("\"{}\"", escape_label_value(&sample.value)),
                };
                output.push_str(&format!("{}\n", paint_sample(&quoted)));
            }
        }
        ResultType::Vector => {
            for s in series {
                for sample in &s.samples {
                    output.push_str(&format!(
                        "{} => {}\n",
                        paint_metric(&s.metric),
                        paint_sample(sample)
                    ));
                }
            }
        }
        ResultType::Matrix => {
            for s in series {
                output.push_str(&format!("{} =>\n", paint_metric(&s.metric)));
                for sample in &s.samples {
                    output.push_str(&format!("{}\n", paint_sample(sample)));
                }
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn labels(pairs: &[(&str, &str)]) -> LabelSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(&labels(&[("__name__", "up")])), "up");
        assert_eq!(
            format_metric(&labels(&[
                ("__name__", "up"),
                ("job", "api"),
                ("instance", "a:9090")
            ])),
            "up{instance=\"a:9090\", job=\"api\"}"
        );
        assert_eq!(format_metric(&labels(&[("job", "a\"b")])), "{job=\"a\\\"b\"}");
        assert_eq!(format_metric(&LabelSet::new()), "{}");
    }

    #[test]
    fn test_decode_vector() {
        let result = json!([
            {"metric": {"__name__": "up", "job": "api"}, "value": [1435781451.781, "1"]}
        ]);
        let series = decode_series(ResultType::Vector, &result).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].metric["job"], "api");
        assert_eq!(
            series[0].samples,
            vec![Sample {
                timestamp: "1435781451.781".to_string(),
                value: "1".to_string()
            }]
        );
    }

    #[test]
    fn test_decode_malformed_vector() {
        let result = json!([{"metric": {"__name__": "up"}}]);
        assert!(decode_series(ResultType::Vector, &result).is_err());
        assert!(decode_series(ResultType::Matrix, &json!({"a": 1})).is_err());
        assert!(decode_series(ResultType::Scalar, &json!([1])).is_err());
    }

    #[test]
    fn test_format_vector_output() {
        let result = json!([
            {"metric": {"__name__": "up", "job": "api"}, "value": [100, "1"]},
            {"metric": {"__name__": "up", "job": "db"}, "value": [100, "0"]}
        ]);
        let series = decode_series(ResultType::Vector, &result).unwrap();
        assert_eq!(
            format_promql_output(ResultType::Vector, &series, false),
            "up{job=\"api\"} => 1 @[100]\nup{job=\"db\"} => 0 @[100]\n"
        );
    }

    #[test]
    fn test_format_matrix_output() {
        let result = json!([
            {"metric": {"__name__": "up"}, "values": [[0, "1"], [15, "0"]]}
        ]);
        let series = decode_series(ResultType::Matrix, &result).unwrap();
        assert_eq!(
            format_promql_output(ResultType::Matrix, &series, false),
            "up =>\n1 @[0]\n0 @[15]\n"
        );
    }

    #[test]
    fn test_format_scalar_and_string_output() {
        let scalar = decode_series(ResultType::Scalar, &json!([12.5, "3"])).unwrap();
        assert_eq!(
            format_promql_output(ResultType::Scalar, &scalar, false),
            "scalar: 3 @[12.5]\n"
        );
        let string = decode_series(ResultType::String, &json!([12.5, "hi"])).unwrap();
        assert_eq!(
            format_promql_output(ResultType::String, &string, false),
            "\"hi\" @[12.5]\n"
        );
    }
}
