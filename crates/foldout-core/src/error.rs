//! Error types for Foldout.

use thiserror::Error;

/// Validation errors raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Group names must contain at least one non-whitespace character.
    #[error("Group name must not be blank")]
    BlankGroupName,

    /// Animation duration of zero.
    #[error("Animation duration must be positive")]
    NonPositiveDuration,

    /// Animation tick interval of zero.
    #[error("Animation tick interval must be positive")]
    NonPositiveTickInterval,

    /// Icon size of zero.
    #[error("Icon size for {zone} must be positive")]
    NonPositiveIconSize { zone: &'static str },

    /// Font size that is zero, negative or not finite.
    #[error("Font size for {zone} must be positive, got {size}")]
    NonPositiveFontSize { zone: &'static str, size: f32 },

    /// Spacing or margin that is negative or not finite.
    #[error("Invalid {what}: {value}")]
    InvalidLength { what: &'static str, value: f32 },

    /// Color string that is not `#rrggbb` or `#rrggbbaa`.
    #[error("Invalid color '{0}'")]
    InvalidColor(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Parsed values failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] CoreError),
}

/// Result type alias for validated operations.
pub type CoreResult<T> = Result<T, CoreError>;
