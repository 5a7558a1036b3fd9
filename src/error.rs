//! Error types and handling for `tripbudget`

use thiserror::Error;

/// Main error type for the `tripbudget` crate
///
/// The reconciler itself never fails; these errors come from the layers
/// around it (configuration, reading and parsing itinerary payloads).
#[derive(Error, Debug)]
pub enum TripBudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Malformed itinerary payloads
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripBudgetError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripBudgetError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TripBudgetError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TripBudgetError::Parse { source } => {
                format!(
                    "The itinerary payload is not valid JSON (line {}, column {}).",
                    source.line(),
                    source.column()
                )
            }
            TripBudgetError::Io { .. } => {
                "Unable to read the itinerary payload. Please check the file path and permissions."
                    .to_string()
            }
            TripBudgetError::General { message } => message.clone(),
        }
    }
}
