pub mod client;
pub mod headers;
pub mod request;

pub use client::build_http_client;
pub use headers::parse_headers;
pub use request::{
    QueryParams, build_query_url, endpoint_url, format_request_line, merge_extra_params,
    parse_params,
};
