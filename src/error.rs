//! Error types and handling for the `travelrec` application

use thiserror::Error;

use crate::loader::LoadError;

/// Main error type for the `travelrec` application
#[derive(Error, Debug)]
pub enum TravelRecError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Dataset loading errors
    #[error("Load error: {source}")]
    Load {
        #[from]
        source: LoadError,
    },

    /// Web server errors
    #[error("Server error: {message}")]
    Server { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelRecError {
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

    /// Create a new server error
    pub fn server<S: Into<String>>(message: S) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelRecError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TravelRecError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelRecError::Load { .. } => {
                "Error loading travel recommendations. Please check the data source and try again."
                    .to_string()
            }
            TravelRecError::Server { message } => {
                format!("Web server failed: {message}")
            }
            TravelRecError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
