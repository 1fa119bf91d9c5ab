//! Error types for the Payroll Liquidation Engine.
//!
//! Two families of errors live here. [`EngineError`] covers the collaborators
//! around the calculator (configuration files, persistence, indicator sources).
//! [`ValidationError`] covers malformed liquidation input and is always reported
//! as a complete list through [`ValidationErrors`], never one at a time.

use std::fmt;

use thiserror::Error;

/// The main error type for the engine's collaborators.
///
/// The liquidation calculator itself never returns this type: configuration and
/// indicator failures fall back to legal defaults before a calculation starts.
///
/// # Example
///
/// ```
/// use liquidation_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/company.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/company.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was structurally invalid.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The economic indicator source could not deliver values.
    #[error("Indicator source '{source_name}' failed: {message}")]
    IndicatorUnavailable {
        /// Name of the source that failed.
        source_name: String,
        /// A description of the failure.
        message: String,
    },

    /// A liquidation could not be stored.
    #[error("Failed to persist liquidation for '{key}': {message}")]
    PersistenceError {
        /// The identifying key of the liquidation.
        key: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// A single boundary-validation failure for liquidation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No employee profile was supplied.
    #[error("Employee profile is required")]
    MissingEmployee,

    /// Days worked fell outside `[1, 31]`.
    #[error("Days worked must be between 1 and 31, got {days}")]
    DaysWorkedOutOfRange {
        /// The rejected value.
        days: u32,
    },

    /// Month fell outside `[1, 12]`.
    #[error("Month must be between 1 and 12, got {month}")]
    MonthOutOfRange {
        /// The rejected value.
        month: u32,
    },

    /// A monetary input was negative.
    #[error("Amount '{field}' must not be negative, got {amount}")]
    NegativeAmount {
        /// Name of the monetary field.
        field: String,
        /// The rejected amount.
        amount: i64,
    },

    /// An hour count was negative.
    #[error("Hours '{field}' must not be negative, got {hours}")]
    NegativeHours {
        /// Name of the hours field.
        field: String,
        /// The rejected value.
        hours: String,
    },

    /// The contract declares zero weekly hours.
    #[error("Weekly contracted hours must be greater than zero")]
    ZeroWeeklyHours,

    /// The contract declares more hours than a week has.
    #[error("Weekly contracted hours must not exceed 168, got {hours}")]
    WeeklyHoursTooLarge {
        /// The rejected value.
        hours: String,
    },

    /// A monetary input exceeded the largest accepted amount.
    #[error("Amount '{field}' must not exceed {max}, got {amount}")]
    AmountTooLarge {
        /// Name of the monetary field.
        field: String,
        /// The rejected amount.
        amount: i64,
        /// The largest accepted amount.
        max: i64,
    },

    /// An hour count exceeded the hours in a month.
    #[error("Hours '{field}' must not exceed 744, got {hours}")]
    HoursTooLarge {
        /// Name of the hours field.
        field: String,
        /// The rejected value.
        hours: String,
    },
}

/// Every validation failure found in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    /// Returns the individual failures.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns the number of failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no failures were collected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())?;
        for error in &self.0 {
            write!(f, "; {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
