use url::Url;

use crate::constants::{SCHEME_HTTP, SCHEME_HTTPS};
use crate::error::{QueryError, Result};

/// Make sure a server address carries a scheme, defaulting to plain http.
///
/// The address is otherwise left untouched, so `localhost:9090` becomes
/// `http://localhost:9090`. Fails if the result does not parse as a URL.
pub fn add_scheme(addr: &str) -> Result<String> {
    let with_scheme = if addr.starts_with(SCHEME_HTTP) || addr.starts_with(SCHEME_HTTPS) {
        addr.to_string()
    } else {
        format!("{}{}", SCHEME_HTTP, addr)
    };

    Url::parse(&with_scheme).map_err(|source| QueryError::InvalidUrl {
        url: addr.to_string(),
        source,
    })?;

    Ok(with_scheme)
}

/// Normalize and parse a server address into the base URL used for API calls
pub fn parse_server_url(addr: &str) -> Result<Url> {
    let with_scheme = add_scheme(addr)?;
    let url = Url::parse(&with_scheme).map_err(|source| QueryError::InvalidUrl {
        url: addr.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(QueryError::InvalidArgument(format!(
            "server URL '{}' cannot be used as a base URL",
            addr
        )));
    }
    Ok(url)
}
