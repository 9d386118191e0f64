//! Error types for display tool operations.

use thiserror::Error;

/// Primary error type for `dctl` operations.
#[derive(Error, Debug)]
pub enum DctlError {
    // External tool errors
    #[error("External display tool not found (searched: {searched})")]
    ToolNotFound { searched: String },

    #[error("Failed to launch '{program}': {reason}")]
    Spawn { program: String, reason: String },

    #[error("'{program}' failed ({status}): {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    // Output parsing errors
    #[error("Could not parse {feature} value '{raw}' as a number")]
    ValueParse { feature: String, raw: String },

    #[error("Could not parse display list: {0}")]
    DiscoveryParse(String),

    // Configuration errors
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl DctlError {
    /// Returns true if the error is recoverable by the user.
    pub const fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ToolNotFound { .. } | Self::ConfigParse(_)
        )
    }

    /// Returns a suggestion for how to fix the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ToolNotFound { .. } => {
                Some("Install BetterDisplay or point --tool (or DCTL_TOOL) at the binary")
            }
            Self::ValueParse { .. } => {
                Some("The tool's output format may have changed; try updating it")
            }
            Self::ConfigParse(_) => Some("Fix or remove the config file, then retry"),
            _ => None,
        }
    }
}

/// Convenience type alias for Results using DctlError.
pub type Result<T> = std::result::Result<T, DctlError>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E: std::error::Error> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| DctlError::Other(format!("{}: {e}", f().into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_is_recoverable_with_hint() {
        let err = DctlError::ToolNotFound {
            searched: "/opt/nowhere".to_string(),
        };
        assert!(err.is_user_recoverable());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn command_failed_is_not_recoverable() {
        let err = DctlError::CommandFailed {
            program: "betterdisplay".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "no such display".to_string(),
        };
        assert!(!err.is_user_recoverable());
        assert!(err.to_string().contains("no such display"));
    }

    #[test]
    fn with_context_wraps_message() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        let err = res.with_context(|| "reading config").unwrap_err();
        assert!(err.to_string().starts_with("reading config"));
    }
}
