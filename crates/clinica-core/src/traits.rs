use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;

/// The remote clinic API that tools are bound to.
///
/// Paths are relative to the implementation's base URL. Both calls return the
/// response body as-is; a transport failure or non-success status is an
/// [`Error::Remote`].
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Issue a GET with the given query string pairs.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, Error>;

    /// Issue a POST with a JSON body.
    async fn post(&self, path: &str, body: Value) -> Result<Value, Error>;
}
