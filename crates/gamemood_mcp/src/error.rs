//! Error types for the MCP and HTTP surfaces.

use gamemood_core::WellnessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Wellness engine error: {0}")]
    Engine(#[from] WellnessError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

impl McpError {
    /// Whether the caller sent something unusable, as opposed to a failure
    /// on our side or upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            McpError::Validation(_) | McpError::Engine(WellnessError::InvalidInput(_))
        )
    }
}

impl From<McpError> for String {
    fn from(err: McpError) -> Self {
        err.to_string()
    }
}

pub type McpResult<T> = Result<T, McpError>;
