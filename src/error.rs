use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntuneError {
    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Graph API error: HTTP {status} {status_text}: {body}")]
    GraphApiError {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Failed to parse configuration file: {message}")]
    ConfigParseError {
        message: String,
        /// Raw file content, kept for diagnostics.
        content: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IntuneError>;

pub use IntuneError as Error;

/// Parse a Graph API error response body and extract the error code/message
/// when the body is the standard OData error envelope.
pub fn enhance_graph_error(error_response: &str) -> String {
    if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(error_response) {
        if let Some(error_obj) = error_json.get("error") {
            let code = error_obj
                .get("code")
                .and_then(|c| c.as_str())
                .unwrap_or("Unknown");
            let message = error_obj
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("No message");

            return format!("{}: {}", code, message);
        }
    }

    error_response.to_string()
}
