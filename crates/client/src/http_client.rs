//! HTTP Client Factory
//!
//! Builds the reqwest client shared by every call to the scheduling service.

use std::time::Duration;

use crate::error::{ApiError, ApiResult};

/// Build a `reqwest::Client` with a request timeout and optional proxy.
///
/// - `Some(url)` -> route every request through that proxy (http, https or socks5)
/// - `None` -> connect directly, ignoring proxy environment variables
pub fn build_http_client(timeout: Duration, proxy_url: Option<&str>) -> ApiResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    match proxy_url {
        Some(url) => {
            let proxy = reqwest::Proxy::all(url).map_err(|e| ApiError::InvalidUrl {
                message: format!("proxy {}: {}", url, e),
            })?;
            builder = builder.proxy(proxy);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    builder.build().map_err(|e| ApiError::Other {
        message: format!("failed to build HTTP client: {}", e),
    })
}
