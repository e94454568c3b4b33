//! Query Prometheus-compatible metrics APIs from the command line.
//!
//! [`processor`] holds the query operations used by the binary: each one
//! builds a [`api::QueryClient`] from an explicitly constructed HTTP client,
//! sends a single GET, decodes the response envelope and hands the result to
//! an [`output::Printer`], returning a process exit code.

pub mod api;
pub mod constants;
pub mod error;
pub mod filter;
pub mod http;
pub mod output;
pub mod processor;
pub mod telemetry;
pub mod types;
pub mod utils;

pub use error::{QueryError, Result};
pub use processor::{query_instant, query_labels, query_range, query_series};
