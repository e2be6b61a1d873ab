use crate::error::{IntuneError, Result};
use serde::{Deserialize, Serialize};

/// Azure AD application credentials for the client-credentials grant.
///
/// Loaded from the environment the same way the Intune tooling expects:
/// `INTUNE_AZURE_*` variables take precedence over the generic `AZURE_*`
/// ones, so a dedicated Intune app registration can coexist with other
/// Azure tooling in the same shell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphCredentials {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
}

impl GraphCredentials {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load credentials from the environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            tenant_id: env_var("INTUNE_AZURE_TENANT_ID", "AZURE_TENANT_ID")?,
            client_id: env_var("INTUNE_AZURE_CLIENT_ID", "AZURE_CLIENT_ID")?,
            client_secret: env_var("INTUNE_AZURE_CLIENT_SECRET", "AZURE_CLIENT_SECRET")?,
        })
    }
}

fn env_var(primary: &str, fallback: &str) -> Result<String> {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .map_err(|_| {
            IntuneError::AuthError(format!(
                "Missing credential environment variable: {} (or {})",
                primary, fallback
            ))
        })
}
