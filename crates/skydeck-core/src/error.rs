//! Centralized error types for the Skydeck widget.
//!
//! The widget never shows errors to the user (a failed refresh just leaves
//! the previous reading on screen), but startup can still fail and those
//! failures are reported through this hierarchy.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a short, non-technical description.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failures raised by the window shell (event loop, renderer).
    #[error("UI error: {0}")]
    Ui(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for a log line or dialog.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Ui(_) => "The widget window could not be opened.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "Configuration file could not be read.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let config_err = ConfigError::Invalid("weather.city".into());
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Config(ConfigError::ParseError("bad toml".into()));
        assert_eq!(
            app_err.user_message(),
            "Configuration file is malformed. Check your settings."
        );
    }

    #[test]
    fn test_display_keeps_context() {
        let err = ConfigError::Read {
            path: "/tmp/skydeck.toml".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/skydeck.toml"));
        assert!(text.contains("denied"));
    }

    #[test]
    fn test_ui_error_message() {
        let err = AppError::Ui("no display".into());
        assert_eq!(err.to_string(), "UI error: no display");
        assert_eq!(err.user_message(), "The widget window could not be opened.");
    }
}
