use clap::{Parser, Subcommand};
use std::time::Duration;

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::utils::parse_duration;

/// Output format options
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Promql,
    Json,
    Csv,
}

/// CLI arguments structure
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    // NETWORK
    /// Timeout for each request in seconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS, help_heading = "NETWORK")]
    pub timeout: u64,

    /// Use a proxy for requests (e.g., "http://127.0.0.1:8080").
    #[arg(long, global = true, help_heading = "NETWORK")]
    pub proxy: Option<String>,

    /// Accept invalid TLS certificates.
    #[arg(long, global = true, help_heading = "NETWORK")]
    pub insecure: bool,

    // HTTP
    /// Custom headers to add to every request (e.g., "X-Scope-OrgID: tenant-1").
    #[arg(short = 'H', long = "header", global = true, help_heading = "HTTP")]
    pub headers: Vec<String>,

    /// Whether to follow HTTP redirects.
    #[arg(
        long,
        global = true,
        default_value_t = true,
        action = clap::ArgAction::Set,
        help_heading = "HTTP"
    )]
    pub follow_redirect: bool,

    // OUTPUT
    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Promql, help_heading = "OUTPUT")]
    pub format: OutputFormat,

    /// Disable color output.
    #[arg(long, global = true, help_heading = "OUTPUT")]
    pub no_color: bool,

    // LOGGING
    /// Log filter (e.g., "debug", "promq=trace"). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn", help_heading = "LOGGING")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an instant query.
    Instant {
        /// Prometheus server to query (e.g., "localhost:9090").
        server: String,

        /// PromQL expression to evaluate.
        expr: String,

        /// Evaluation time (RFC 3339 or Unix timestamp). Defaults to the server's current time.
        #[arg(long, default_value = "")]
        time: String,
    },

    /// Run a range query.
    Range {
        /// Prometheus server to query (e.g., "localhost:9090").
        server: String,

        /// PromQL expression to evaluate.
        expr: String,

        /// Range start (RFC 3339 or Unix timestamp). Defaults to five minutes before the end.
        #[arg(long, default_value = "")]
        start: String,

        /// Range end (RFC 3339 or Unix timestamp). Defaults to now.
        #[arg(long, default_value = "")]
        end: String,

        /// Resolution step (e.g., "15s", "0.5"). Zero sends a one second step.
        #[arg(long, value_parser = parse_duration, default_value = "0")]
        step: Duration,

        /// Extra query parameter to send (e.g., "timeout=30s"). Repeatable.
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,
    },

    /// Find series matching label selectors.
    Series {
        /// Prometheus server to query (e.g., "localhost:9090").
        server: String,

        /// Series selector (e.g., 'up{job="api"}'). Repeatable, at least one is required.
        #[arg(long = "match", required = true)]
        matches: Vec<String>,

        /// Start time (RFC 3339 or Unix timestamp).
        #[arg(long, default_value = "")]
        start: String,

        /// End time (RFC 3339 or Unix timestamp).
        #[arg(long, default_value = "")]
        end: String,
    },

    /// List the values of a label.
    Labels {
        /// Prometheus server to query (e.g., "localhost:9090").
        server: String,

        /// Label name (e.g., "job").
        name: String,

        /// Start time (RFC 3339 or Unix timestamp).
        #[arg(long, default_value = "")]
        start: String,

        /// End time (RFC 3339 or Unix timestamp).
        #[arg(long, default_value = "")]
        end: String,

        /// Only print values containing this string.
        #[arg(long, help_heading = "FILTER")]
        filter_string: Option<String>,

        /// Only print values matching this regex.
        #[arg(long, help_heading = "FILTER")]
        filter_regex: Option<String>,
    },
}

/// Settings for the HTTP client shared by all requests of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout: u64,
    pub proxy: Option<String>,
    pub insecure: bool,
    pub headers: Vec<String>,
    pub follow_redirect: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT_SECS,
            proxy: None,
            insecure: false,
            headers: Vec::new(),
            follow_redirect: true,
        }
    }
}

impl From<&Cli> for ClientConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            timeout: cli.timeout,
            proxy: cli.proxy.clone(),
            insecure: cli.insecure,
            headers: cli.headers.clone(),
            follow_redirect: cli.follow_redirect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_range_command() {
        let cli = Cli::parse_from([
            "promq",
            "range",
            "localhost:9090",
            "up",
            "--start",
            "0",
            "--end",
            "300",
            "--step",
            "10ms",
            "-p",
            "timeout=30s",
            "--format",
            "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Range {
                server,
                expr,
                start,
                end,
                step,
                params,
            } => {
                assert_eq!(server, "localhost:9090");
                assert_eq!(expr, "up");
                assert_eq!(start, "0");
                assert_eq!(end, "300");
                assert_eq!(step, Duration::from_millis(10));
                assert_eq!(params, vec!["timeout=30s".to_string()]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_client_config_from_cli() {
        let cli = Cli::parse_from([
            "promq",
            "instant",
            "localhost:9090",
            "up",
            "--timeout",
            "5",
            "-H",
            "X-Scope-OrgID: tenant-1",
            "--follow-redirect",
            "false",
        ]);
        let config = ClientConfig::from(&cli);
        assert_eq!(config.timeout, 5);
        assert_eq!(config.headers, vec!["X-Scope-OrgID: tenant-1".to_string()]);
        assert!(!config.follow_redirect);
        assert!(!config.insecure);
    }

    #[test]
    fn test_series_requires_match() {
        assert!(Cli::try_parse_from(["promq", "series", "localhost:9090"]).is_err());
    }
}
