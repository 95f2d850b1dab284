//! Error types for the data-type engine

use thiserror::Error;

/// Result type for data-type operations
pub type Result<T> = std::result::Result<T, DataTypeError>;

/// Programming errors of the data-type engine.
///
/// These abort the current operation entirely and signal a configuration
/// mistake. Data errors (invalid user input, failed constraints) are never
/// represented here; they travel as [`crate::validation::ValidationErrors`].
#[derive(Error, Debug)]
pub enum DataTypeError {
    #[error("type cannot be used until the data-type system is initialized")]
    NotInitialized,

    #[error("data type cannot be used statically; initialize the data-type system with use_static = true")]
    StaticUsageDisabled,

    #[error("type having name '{name}' is already registered")]
    DuplicateTypeName { name: String },

    #[error("type having name '{name}' is not registered")]
    UnknownTypeName { name: String },

    #[error("prototype of kind '{kind}' is not registered; look it up by its registered name")]
    UnregisteredPrototype { kind: String },

    #[error("constraint '{name}' is undefined")]
    UnknownConstraint { name: String },

    #[error("constraint '{name}' has invalid parameters: {reason}")]
    InvalidConstraint { name: String, reason: String },

    #[error("date type requires a format pattern in its definition")]
    MissingDateFormat,

    #[error("wrong type of value for {kind} type: '{actual}'")]
    WrongValueType { kind: String, actual: String },

    #[error("{kind} type does not support {operation}")]
    UnsupportedOperation { kind: String, operation: String },

    #[error("invalid locale format '{0}'")]
    InvalidLocale(String),

    #[error("localization error: {0}")]
    Localization(String),
}
