//! Shared HTTP client and request helpers.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::BridgeError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        build_client(DEFAULT_TIMEOUT).expect("Failed to build HTTP client")
    })
}

/// Build a client with a custom request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, BridgeError> {
    Ok(reqwest::Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .build()?)
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> Result<HeaderMap, BridgeError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let value = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| BridgeError::Authentication("API key contains invalid header characters".into()))?;
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Turn a non-success response into an error carrying status and raw body.
pub async fn error_from_response(resp: reqwest::Response) -> BridgeError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    BridgeError::api(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_headers_set_authorization() {
        let headers = bearer_headers("secret").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn newline_in_key_is_rejected() {
        assert!(matches!(
            bearer_headers("bad\nkey"),
            Err(BridgeError::Authentication(_))
        ));
    }
}
