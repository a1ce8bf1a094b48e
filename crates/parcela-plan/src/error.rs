//! Error types for plan calculation and configuration.

use parcela_core::CoreError;
use parcela_math::MathError;
use thiserror::Error;

/// Plan calculation result type.
pub type PlanResult<T> = Result<T, PlanError>;

/// Why a plan could not be produced.
///
/// Calculations either return a complete result or one of these; partial
/// schedules are never returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The inputs are out of range or inconsistent.
    #[error("Invalid params: {reason}")]
    InvalidParams {
        /// What was wrong with the inputs.
        reason: String,
    },

    /// Valid inputs whose computation failed or broke a constraint.
    #[error("Calculation error: {reason}")]
    CalculationError {
        /// What went wrong.
        reason: String,
    },
}

impl PlanError {
    /// Creates an invalid params error.
    #[must_use]
    pub fn invalid_params(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    /// Creates a calculation error.
    #[must_use]
    pub fn calculation(reason: impl Into<String>) -> Self {
        Self::CalculationError {
            reason: reason.into(),
        }
    }

    /// True for [`PlanError::InvalidParams`].
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, Self::InvalidParams { .. })
    }

    /// The reason text, without the kind prefix.
    pub fn reason(&self) -> &str {
        match self {
            Self::InvalidParams { reason } | Self::CalculationError { reason } => reason,
        }
    }
}

impl From<CoreError> for PlanError {
    fn from(err: CoreError) -> Self {
        Self::invalid_params(err.to_string())
    }
}

impl From<MathError> for PlanError {
    fn from(err: MathError) -> Self {
        Self::calculation(err.to_string())
    }
}

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {0:?}")]
    MultipleValidationErrors(Vec<ValidationError>),

    /// The configuration text could not be parsed.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The configured calendar could not be built.
    #[error("Calendar error: {0}")]
    Calendar(#[from] CoreError),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_error_display() {
        let err = PlanError::invalid_params("installments must be at least 1");
        assert_eq!(err.to_string(), "Invalid params: installments must be at least 1");
        assert!(err.is_invalid_params());
        assert_eq!(err.reason(), "installments must be at least 1");
    }

    #[test]
    fn test_core_error_maps_to_invalid_params() {
        let err: PlanError = CoreError::invalid_date("2025-02-30").into();
        assert!(err.is_invalid_params());
    }

    #[test]
    fn test_math_error_maps_to_calculation_error() {
        let err: PlanError = MathError::convergence_failed(100, 1.0).into();
        assert!(matches!(err, PlanError::CalculationError { .. }));
    }

    struct Always(Vec<ValidationError>);

    impl Validate for Always {
        fn validate(&self) -> Vec<ValidationError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_validate_or_error() {
        assert!(Always(vec![]).validate_or_error().is_ok());

        let single = Always(vec![ValidationError::new("a", "bad")]);
        assert!(matches!(single.validate_or_error(), Err(ConfigError::Validation { .. })));

        let many = Always(vec![ValidationError::new("a", "bad"), ValidationError::new("b", "bad")]);
        assert!(matches!(
            many.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(errs)) if errs.len() == 2
        ));
    }
}
