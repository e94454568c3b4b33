use reqwest::{Client, redirect::Policy};
use std::time::Duration;

use crate::constants::{DEFAULT_REDIRECT_LIMIT, USER_AGENT};
use crate::error::Result;
use crate::http::headers::parse_headers;
use crate::types::ClientConfig;

/// Build the HTTP client used for every API call of one invocation
pub fn build_http_client(config: &ClientConfig) -> Result<Client> {
    let redirect_policy = if config.follow_redirect {
        Policy::limited(DEFAULT_REDIRECT_LIMIT)
    } else {
        Policy::none()
    };

    let default_headers = parse_headers(&config.headers);

    let mut client_builder = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout))
        .redirect(redirect_policy)
        .default_headers(default_headers);

    if config.insecure {
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)?;
        client_builder = client_builder.proxy(proxy);
    }

    Ok(client_builder.build()?)
}
