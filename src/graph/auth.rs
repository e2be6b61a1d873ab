use crate::config::GraphCredentials;
use crate::error::{IntuneError, Result};
use oauth2::{
    basic::BasicClient, reqwest::async_http_client, AuthUrl, ClientId, ClientSecret, Scope,
    TokenResponse, TokenUrl,
};

const MICROSOFT_AUTHORITY: &str = "https://login.microsoftonline.com";
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Acquire an access token via the client-credentials grant.
///
/// This is the only auth flow the components support; they are intended to
/// run unattended inside an orchestration engine, so interactive flows are
/// out of scope.
pub async fn acquire_token(credentials: &GraphCredentials) -> Result<String> {
    let auth_url = AuthUrl::new(format!(
        "{}/{}/oauth2/v2.0/authorize",
        MICROSOFT_AUTHORITY, credentials.tenant_id
    ))
    .map_err(|e| IntuneError::AuthError(format!("Invalid auth URL: {}", e)))?;

    let token_url = TokenUrl::new(format!(
        "{}/{}/oauth2/v2.0/token",
        MICROSOFT_AUTHORITY, credentials.tenant_id
    ))
    .map_err(|e| IntuneError::AuthError(format!("Invalid token URL: {}", e)))?;

    let client = BasicClient::new(
        ClientId::new(credentials.client_id.clone()),
        Some(ClientSecret::new(credentials.client_secret.clone())),
        auth_url,
        Some(token_url),
    );

    let token = client
        .exchange_client_credentials()
        .add_scope(Scope::new(GRAPH_SCOPE.to_string()))
        .request_async(async_http_client)
        .await
        .map_err(|e| IntuneError::AuthError(format!("Client credentials exchange failed: {}", e)))?;

    Ok(token.access_token().secret().clone())
}
