//! HTTP client for the companion server endpoints.
//!
//! Two operations against fixed paths: `ping` (GET `/ping`, response
//! ignored) and the JSON exchange (POST `/exchange`). The exchange comes in
//! two flavors: [`ExchangeClient::try_exchange`] propagates each failure
//! stage as a typed error, while [`ExchangeClient::exchange`] reproduces the
//! lossy contract of the original client: any failure or falsy response
//! collapses to an empty JSON object.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::config::Config;
use crate::error::{Result, TetherError};
use crate::heartbeat::Pinger;

/// Fixed liveness endpoint path.
pub const PING_PATH: &str = "/ping";

/// Fixed exchange endpoint path.
pub const EXCHANGE_PATH: &str = "/exchange";

/// Client for the companion server's `/ping` and `/exchange` endpoints.
///
/// Cheap to clone; the underlying connection pool is shared. No request
/// timeout is configured: a hung request suspends the calling task
/// indefinitely, matching the original behavior.
#[derive(Clone)]
pub struct ExchangeClient {
    client: Client,
    ping_url: Url,
    exchange_url: Url,
}

impl ExchangeClient {
    /// Create a client for the given server origin (e.g.
    /// `http://127.0.0.1:7878`). Only http/https origins are accepted.
    pub fn new(server: &str) -> Result<Self> {
        let origin = Url::parse(server)
            .map_err(|e| TetherError::Config(format!("invalid server origin '{}': {}", server, e)))?;

        match origin.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TetherError::Config(format!(
                    "unsupported scheme '{}': only http/https origins are allowed",
                    other
                )));
            }
        }

        // Root-relative joins, the way a page resolves fetch("/ping").
        let ping_url = origin
            .join(PING_PATH)
            .map_err(|e| TetherError::Config(format!("cannot join ping path: {}", e)))?;
        let exchange_url = origin
            .join(EXCHANGE_PATH)
            .map_err(|e| TetherError::Config(format!("cannot join exchange path: {}", e)))?;

        Ok(Self {
            client: Client::new(),
            ping_url,
            exchange_url,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.server)
    }

    /// Issue one liveness GET to `/ping`.
    ///
    /// Resolves once response headers arrive; status and body are dropped
    /// without inspection.
    pub async fn ping(&self) -> Result<()> {
        self.client
            .get(self.ping_url.clone())
            .send()
            .await
            .map_err(|e| TetherError::Transport(format!("ping failed: {}", e)))?;
        Ok(())
    }

    /// Perform one JSON exchange, propagating failures as typed errors.
    ///
    /// Serializes `payload`, POSTs it to `/exchange` with
    /// `Content-Type: application/json`, reads the full response body as
    /// text, and parses it as JSON. The HTTP status code is not inspected;
    /// the body is parsed regardless of status. No truthiness filtering is
    /// applied to the result.
    pub async fn try_exchange<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Value> {
        let body = serde_json::to_string(payload)
            .map_err(|e| TetherError::Serialize(format!("payload is not serializable: {}", e)))?;

        let response = self
            .client
            .post(self.exchange_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| TetherError::Transport(format!("exchange request failed: {}", e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| TetherError::Body(format!("failed to read exchange response: {}", e)))?;

        serde_json::from_str(&text)
            .map_err(|e| TetherError::Parse(format!("invalid exchange response JSON: {}", e)))
    }

    /// Perform one JSON exchange with the lossy truthy-or-empty contract.
    ///
    /// Returns the parsed response if it is truthy, and an empty object
    /// `{}` if the response is falsy or any stage of the exchange failed.
    /// Failures are logged and never surface to the caller, so an
    /// intentionally falsy server response is indistinguishable from a
    /// failed request. Callers that need to tell the two apart should use
    /// [`Self::try_exchange`].
    pub async fn exchange<T: Serialize + ?Sized>(&self, payload: &T) -> Value {
        match self.try_exchange(payload).await {
            Ok(value) if !is_falsy(&value) => value,
            Ok(_) => empty_object(),
            Err(e) => {
                warn!("exchange failed: {}", e);
                empty_object()
            }
        }
    }
}

#[async_trait]
impl Pinger for ExchangeClient {
    async fn ping(&self) -> Result<()> {
        ExchangeClient::ping(self).await
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// JavaScript truthiness for JSON values: `null`, `false`, numeric zero,
/// and the empty string are falsy; everything else, including `[]` and
/// `{}`, is truthy.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = ExchangeClient::new("http://127.0.0.1:7878").unwrap();
        assert_eq!(client.ping_url.as_str(), "http://127.0.0.1:7878/ping");
        assert_eq!(
            client.exchange_url.as_str(),
            "http://127.0.0.1:7878/exchange"
        );
    }

    #[test]
    fn test_client_origin_with_path_joins_from_root() {
        let client = ExchangeClient::new("http://127.0.0.1:7878/app/page").unwrap();
        assert_eq!(client.ping_url.as_str(), "http://127.0.0.1:7878/ping");
    }

    #[test]
    fn test_client_rejects_bad_origin() {
        let result = ExchangeClient::new("not an origin");
        assert!(matches!(result, Err(TetherError::Config(_))));
    }

    #[test]
    fn test_client_rejects_non_http_scheme() {
        let result = ExchangeClient::new("ftp://127.0.0.1:21");
        assert!(matches!(result, Err(TetherError::Config(_))));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            server: "https://example.com".to_string(),
        };
        let client = ExchangeClient::from_config(&config).unwrap();
        assert_eq!(client.exchange_url.as_str(), "https://example.com/exchange");
    }

    #[test]
    fn test_falsy_values() {
        assert!(is_falsy(&Value::Null));
        assert!(is_falsy(&json!(false)));
        assert!(is_falsy(&json!(0)));
        assert!(is_falsy(&json!(0.0)));
        assert!(is_falsy(&json!("")));
    }

    #[test]
    fn test_truthy_values() {
        assert!(!is_falsy(&json!(true)));
        assert!(!is_falsy(&json!(1)));
        assert!(!is_falsy(&json!(-0.5)));
        assert!(!is_falsy(&json!("alive")));
        assert!(!is_falsy(&json!([])));
        assert!(!is_falsy(&json!({})));
        assert!(!is_falsy(&json!({"received": null})));
    }
}
