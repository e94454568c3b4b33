use colored::*;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use crate::api::QueryClient;
use crate::constants::EXIT_SUCCESS;
use crate::error::{QueryError, Result};
use crate::filter::LabelFilter;
use crate::output::Printer;
use crate::utils::resolve_range;

/// Run an instant query and print the result.
///
/// Returns the process exit code: 0 on success, non-zero after reporting
/// the error on stderr.
pub async fn query_instant(
    http: &Client,
    server: &str,
    query: &str,
    time: &str,
    printer: &mut dyn Printer,
) -> i32 {
    finish(run_instant(http, server, query, time, printer).await)
}

/// Run a range query and print the result.
///
/// `params` are extra query parameters sent along with the range; a zero
/// `step` is sent as one second. Returns the process exit code.
#[allow(clippy::too_many_arguments)]
pub async fn query_range(
    http: &Client,
    server: &str,
    params: &BTreeMap<String, String>,
    query: &str,
    start: &str,
    end: &str,
    step: Duration,
    printer: &mut dyn Printer,
) -> i32 {
    finish(run_range(http, server, params, query, start, end, step, printer).await)
}

/// Find the series matching `matchers` and print their label sets
pub async fn query_series(
    http: &Client,
    server: &str,
    matchers: &[String],
    start: &str,
    end: &str,
    printer: &mut dyn Printer,
) -> i32 {
    finish(run_series(http, server, matchers, start, end, printer).await)
}

/// Print the values of label `name` that pass `filter`
pub async fn query_labels(
    http: &Client,
    server: &str,
    name: &str,
    start: &str,
    end: &str,
    filter: &LabelFilter,
    printer: &mut dyn Printer,
) -> i32 {
    finish(run_labels(http, server, name, start, end, filter, printer).await)
}

async fn run_instant(
    http: &Client,
    server: &str,
    query: &str,
    time: &str,
    printer: &mut dyn Printer,
) -> Result<()> {
    let client = QueryClient::new(http.clone(), server)?;
    let data = client.instant(query, time).await?;
    printer.print_value(data.result_type, &data.result)
}

#[allow(clippy::too_many_arguments)]
async fn run_range(
    http: &Client,
    server: &str,
    params: &BTreeMap<String, String>,
    query: &str,
    start: &str,
    end: &str,
    step: Duration,
    printer: &mut dyn Printer,
) -> Result<()> {
    let client = QueryClient::new(http.clone(), server)?;
    let (start, end) = resolve_range(start, end)?;
    let data = client.range(query, &start, &end, step, params).await?;
    printer.print_value(data.result_type, &data.result)
}

async fn run_series(
    http: &Client,
    server: &str,
    matchers: &[String],
    start: &str,
    end: &str,
    printer: &mut dyn Printer,
) -> Result<()> {
    let client = QueryClient::new(http.clone(), server)?;
    let series = client.series(matchers, start, end).await?;
    printer.print_series(&series)
}

async fn run_labels(
    http: &Client,
    server: &str,
    name: &str,
    start: &str,
    end: &str,
    filter: &LabelFilter,
    printer: &mut dyn Printer,
) -> Result<()> {
    let client = QueryClient::new(http.clone(), server)?;
    let values = client.label_values(name, start, end).await?;
    printer.print_label_values(&filter.apply(values))
}

/// Convert a query outcome into an exit code, reporting any error
pub fn finish(result: Result<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            report_error(&err);
            err.exit_code()
        }
    }
}

/// Print an error for the user on stderr
pub fn report_error(err: &QueryError) {
    debug!(kind = err.kind(), error = ?err, "query failed");
    eprintln!("{} {}", "[Error]".red(), err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::EXIT_FAILURE;

    #[test]
    fn test_finish() {
        assert_eq!(finish(Ok(())), EXIT_SUCCESS);
        assert_eq!(
            finish(Err(QueryError::InvalidArgument("bad".to_string()))),
            EXIT_FAILURE
        );
    }
}
