pub mod auth;

use crate::config::GraphCredentials;
use crate::error::{IntuneError, Result};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

pub const GRAPH_API_HOST: &str = "https://graph.microsoft.com";

/// Microsoft Graph API client.
///
/// A thin bearer-authenticated JSON transport: one HTTP call per lifecycle
/// operation, no retries. Transient-failure handling belongs to the
/// orchestration engine driving the resource providers, not to this client;
/// any non-success response is surfaced as [`IntuneError::GraphApiError`]
/// with the remote status code and body.
pub struct GraphClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl GraphClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(access_token, GRAPH_API_HOST)
    }

    /// Create a client against a non-default host. Used by the integration
    /// tests to point at a local mock server.
    pub fn with_base_url(access_token: String, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            access_token,
            base_url: base_url.into(),
        }
    }

    /// Create a client by acquiring a token with credentials from the
    /// environment (client-credentials grant).
    pub async fn from_env() -> Result<Self> {
        let credentials = GraphCredentials::from_env()?;
        let access_token = auth::acquire_token(&credentials).await?;
        Ok(Self::new(access_token))
    }

    /// GET from the v1.0 endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.send(Method::GET, "v1.0", endpoint, None::<&Value>).await
    }

    /// POST to the v1.0 endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value> {
        self.send(Method::POST, "v1.0", endpoint, Some(body)).await
    }

    /// POST to the beta endpoint.
    pub async fn post_beta<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value> {
        self.send(Method::POST, "beta", endpoint, Some(body)).await
    }

    /// PATCH against the v1.0 endpoint.
    pub async fn patch<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value> {
        self.send(Method::PATCH, "v1.0", endpoint, Some(body)).await
    }

    /// PATCH against the beta endpoint.
    pub async fn patch_beta<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value> {
        self.send(Method::PATCH, "beta", endpoint, Some(body)).await
    }

    /// PUT against the beta endpoint. Settings-catalog policies replace the
    /// whole body on update rather than patching it.
    pub async fn put_beta<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Value> {
        self.send(Method::PUT, "beta", endpoint, Some(body)).await
    }

    /// DELETE against the v1.0 endpoint.
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        self.send(Method::DELETE, "v1.0", endpoint, None::<&Value>)
            .await?;
        Ok(())
    }

    /// DELETE against the beta endpoint.
    pub async fn delete_beta(&self, endpoint: &str) -> Result<()> {
        self.send(Method::DELETE, "beta", endpoint, None::<&Value>)
            .await?;
        Ok(())
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        version: &str,
        endpoint: &str,
        body: Option<&T>,
    ) -> Result<Value> {
        let url = format!(
            "{}/{}/{}",
            self.base_url,
            version,
            endpoint.trim_start_matches('/')
        );

        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&self.access_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(IntuneError::GraphApiError {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown")
                    .to_string(),
                body: crate::error::enhance_graph_error(&text),
            });
        }

        // Graph returns empty bodies for 204s and the occasional plain-text
        // payload (e.g. $count); everything else is JSON.
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string())))
    }
}

/// Extract the remote-assigned `id` from a creation response.
pub(crate) fn response_id(response: &Value) -> Result<String> {
    response
        .get("id")
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            IntuneError::InvalidInput(format!(
                "Graph response did not contain an id: {}",
                response
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_id_present() {
        let rs = json!({"id": "abc-123", "displayName": "x"});
        assert_eq!(response_id(&rs).unwrap(), "abc-123");
    }

    #[test]
    fn test_response_id_missing() {
        assert!(response_id(&json!({"displayName": "x"})).is_err());
    }
}
