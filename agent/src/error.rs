use thiserror::Error;

/// Failures reported back to the caller of an agent tool.
#[derive(Error, Debug, PartialEq)]
pub enum ToolError {
    #[error("Missing parameter: {0} must be provided")]
    MissingParameter(&'static str),

    #[error("Invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Failed to {action}: {reason}")]
    Ledger { action: String, reason: String },
}

impl ToolError {
    /// Wrap a transport or contract failure, keeping the full cause chain.
    pub fn ledger(action: impl Into<String>, err: &eyre::Report) -> Self {
        Self::Ledger {
            action: action.into(),
            reason: format!("{:#}", err),
        }
    }
}
