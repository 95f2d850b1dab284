//! Locale-bound type instances
//!
//! A kind's instance implements [`DataType`]: parse, format, validate,
//! equals and compare against its definition and a locale-bound
//! localization. Instances go through exactly one `Uninitialized →
//! Initialized` transition, driven by [`crate::prototype::Prototype`];
//! everything the engine hands out is already initialized.

use serde_json::{Map, Value as Json};

use crate::context::DataTypeContext;
use crate::definition::{NumberFormatOptions, TypeDefinition};
use crate::error::{DataTypeError, Result};
use crate::locale::Locale;
use crate::validation::ValidationErrors;
use crate::value::Value;

pub mod core;
pub mod date;
pub mod number;
pub mod text;

pub use self::core::TypeCore;
pub use self::date::DateTimeType;
pub use self::number::NumberType;
pub use self::text::TextType;

/// Builds an uninitialized instance of a kind from a definition
pub type TypeConstructor = fn(TypeDefinition) -> Result<Box<dyn DataType>>;

/// Outcome of parsing raw input: a typed value, or structured format errors.
///
/// Format errors are data errors, not programming errors; callers branch on
/// them without any exception-style handling.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseResult {
    Value(Value),
    Invalid(ValidationErrors),
}

impl ParseResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseResult::Value(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            ParseResult::Value(value) => Some(value),
            ParseResult::Invalid(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ParseResult::Value(_) => None,
            ParseResult::Invalid(errors) => Some(errors),
        }
    }
}

/// A locale-bound, fully initialized data type
pub trait DataType: Send + Sync {
    /// Kind tag, e.g. `number`, `text`, `date` or a custom string
    fn kind(&self) -> &str;

    /// Definition this type is based on
    fn definition(&self) -> &TypeDefinition;

    /// Locale of this type
    fn locale(&self) -> &Locale;

    /// Properties computed during initialization
    fn properties(&self) -> &Map<String, Json>;

    /// One-shot initialization: binds the locale, composes constraint
    /// validators and resolves localizations. Driven by the prototype;
    /// never called twice.
    fn init(&mut self, locale: Locale, context: &DataTypeContext) -> Result<()>;

    /// Overlay initializer-contributed properties; driven by the prototype
    /// right after [`DataType::init`]
    fn merge_properties(&mut self, extra: Map<String, Json>);

    /// Parse raw input into a typed value after a format-validity check
    fn parse(&self, raw: &str) -> Result<ParseResult>;

    /// Format a typed value into a locale-formatted string
    fn format(&self, value: &Value) -> Result<String> {
        self.format_with(value, None)
    }

    /// Format with per-call options overriding the definition's format.
    /// Only the number kind has overridable options; other kinds ignore them.
    fn format_with(&self, value: &Value, options: Option<&NumberFormatOptions>) -> Result<String>;

    /// Check a present value against intrinsic validity and constraints.
    /// An absent value is no error; required-ness belongs to another layer.
    fn validate(&self, value: Option<&Value>) -> Result<Option<ValidationErrors>>;

    /// Locale-specific syntactic check of raw input, independent of `validate`
    fn validate_format(&self, raw: &str) -> Result<Option<ValidationErrors>>;

    /// Whether two values are equal under this kind
    fn equals(&self, first: &Value, second: &Value) -> Result<bool> {
        let _ = (first, second);
        Err(DataTypeError::UnsupportedOperation {
            kind: self.kind().to_string(),
            operation: "equality check".to_string(),
        })
    }

    /// Signed ordering of two values under this kind
    fn compare(&self, first: &Value, second: &Value) -> Result<f64> {
        let _ = (first, second);
        Err(DataTypeError::UnsupportedOperation {
            kind: self.kind().to_string(),
            operation: "comparison".to_string(),
        })
    }
}
