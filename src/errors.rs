//! Unified error type for the activity tracker.
//!
//! Every core operation returns [`Result`]. Validation and authentication
//! failures are distinct variants so the command layer can answer them with a
//! specific message instead of the generic store-failure reply.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The store rejected or failed a call
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The caller has no registered identity
    #[error("Authentication required: register a profile first")]
    AuthenticationRequired,

    /// A required field was missing or empty
    #[error("Validation failed: {message}")]
    Validation {
        /// Which rule was broken
        message: String,
    },

    /// No activity with this id exists
    #[error("Activity not found: {id}")]
    ActivityNotFound {
        /// Id or title that was looked up
        id: String,
    },

    /// Status text outside the `pending` / `done` enumeration
    #[error("Invalid status '{value}': expected pending or done")]
    InvalidStatus {
        /// The rejected input
        value: String,
    },

    /// Category text outside the fixed category list
    #[error("Invalid category '{value}'")]
    InvalidCategory {
        /// The rejected input
        value: String,
    },

    /// Date text that is not `YYYY-MM-DD`
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// Report range whose end precedes its start
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// Requested first day
        start: chrono::NaiveDate,
        /// Requested last day
        end: chrono::NaiveDate,
    },

    /// Another submission for the same form is still running
    #[error("A submission for {key} is already in progress")]
    SubmissionInFlight {
        /// Display form of the submission key
        key: String,
    },

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing into a response buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

impl Error {
    /// Whether this error came from user input rather than the store or platform.
    ///
    /// The command layer echoes user errors verbatim and replaces everything
    /// else with a static message.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationRequired
                | Self::Validation { .. }
                | Self::ActivityNotFound { .. }
                | Self::InvalidStatus { .. }
                | Self::InvalidCategory { .. }
                | Self::InvalidDate { .. }
                | Self::InvalidDateRange { .. }
                | Self::SubmissionInFlight { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_classified() {
        assert!(Error::AuthenticationRequired.is_user_error());
        assert!(
            Error::Validation {
                message: "title".to_string()
            }
            .is_user_error()
        );
        assert!(!Error::Database(sea_orm::DbErr::Custom("boom".to_string())).is_user_error());
        assert!(
            !Error::Config {
                message: "bad".to_string()
            }
            .is_user_error()
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidStatus {
            value: "finished".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid status 'finished': expected pending or done"
        );
    }
}
