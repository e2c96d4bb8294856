use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

use clinica_core::error::Error;
use clinica_core::traits::RemoteApi;

/// Production base URL of the clinic API.
pub const DEFAULT_BASE_URL: &str = "https://mcp-clinica-nas-nuvens.onrender.com/api/v1";

/// reqwest-backed implementation of [`RemoteApi`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the given base URL. A trailing `/` is dropped.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, Error> {
        let resp = request
            .send()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Remote(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%status, "remote call failed");
            return Err(Error::Remote(format!(
                "request failed with status {status}: {body}"
            )));
        }

        Ok(parse_body(body))
    }
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// JSON bodies are decoded; anything else comes back as a JSON string.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

#[async_trait]
impl RemoteApi for HttpApi {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, Error> {
        tracing::debug!(path, params = query.len(), "GET");
        self.send(self.client.get(self.url(path)).query(query)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, Error> {
        tracing::debug!(path, "POST");
        self.send(self.client.post(self.url(path)).json(&body)).await
    }
}
