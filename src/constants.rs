/// HTTP constants
pub const DEFAULT_REDIRECT_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("promq/", env!("CARGO_PKG_VERSION"));

/// URL scheme constants
pub const SCHEME_HTTP: &str = "http://";
pub const SCHEME_HTTPS: &str = "https://";

/// API path segments, relative to the server base URL
pub const API_PREFIX: [&str; 2] = ["api", "v1"];
pub const QUERY_PATH: &str = "query";
pub const QUERY_RANGE_PATH: &str = "query_range";
pub const SERIES_PATH: &str = "series";
pub const LABEL_PATH: &str = "label";
pub const LABEL_VALUES_PATH: &str = "values";

/// Query parameter names owned by the range endpoint
pub const RESERVED_RANGE_PARAMS: [&str; 4] = ["query", "start", "end", "step"];

/// Step sent when none was given
pub const DEFAULT_STEP: &str = "1";

/// Lookback used for a range query with no explicit start, in seconds
pub const DEFAULT_RANGE_LOOKBACK_SECS: i64 = 300;

/// Longest response body excerpt shown in error messages
pub const BODY_PREVIEW_CHARS: usize = 200;

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
