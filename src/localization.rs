//! Localization boundary contracts
//!
//! The engine never formats or parses numbers and dates itself; it delegates
//! to a [`LocalizationProvider`] and only adds constraint checking and
//! message localization on top. Concrete providers live outside the engine
//! (a reference one ships in [`crate::test_support`]).

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::definition::NumberFormatOptions;
use crate::error::Result;
use crate::locale::Locale;
use crate::message::{LocalizedMessage, MessageSpec};
use crate::validation::{ValidationErrors, ViolationParams};

/// Error key reported by a number localization for malformed input
pub const NUMBER_FORMAT_ERROR: &str = "number_format";
/// Error key reported by a date localization for input not matching the pattern
pub const DATE_FORMAT_ERROR: &str = "date_format";
/// Error key reported by a date localization for an impossible calendar date
pub const DATE_INVALID_ERROR: &str = "date_invalid";

/// Locale-specific numeric syntax, parsing and formatting
pub trait NumberLocalization: Send + Sync {
    fn group_separator(&self) -> &str;
    fn decimal_separator(&self) -> &str;
    fn grouping(&self) -> bool;

    /// Convert a syntactically valid numeric string into a number
    fn parse(&self, raw: &str) -> Result<f64>;

    /// Syntactic check; reports [`NUMBER_FORMAT_ERROR`] on failure
    fn validate_format(&self, raw: &str) -> Option<ValidationErrors>;

    fn format(&self, value: f64, options: &NumberFormatOptions) -> String;

    /// Intrinsic validity of an already-typed number
    fn validate(&self, value: f64) -> Option<ValidationErrors>;
}

/// Locale-specific date syntax, parsing and formatting over a pattern
pub trait DateTimeLocalization: Send + Sync {
    /// Convert a string matching `pattern` into a date
    fn parse(&self, raw: &str, pattern: &str) -> Result<NaiveDateTime>;

    /// Syntactic check against `pattern`; reports [`DATE_FORMAT_ERROR`]
    fn validate_format(&self, raw: &str, pattern: &str) -> Option<ValidationErrors>;

    fn format(&self, value: &NaiveDateTime, pattern: &str) -> String;

    /// Intrinsic validity check; reports [`DATE_INVALID_ERROR`]
    fn validate(&self, value: &NaiveDateTime) -> Option<ValidationErrors>;
}

/// Produces displayable text for message descriptors.
///
/// The engine only ever constructs descriptors via [`Translator::create`];
/// rendering belongs to the consumer.
pub trait Translator: Send + Sync {
    /// Resolve a declared message against a violation payload. The resulting
    /// parameters are the payload merged with the message's fixed params.
    fn create(&self, message: &MessageSpec, params: &ViolationParams) -> LocalizedMessage {
        let mut merged = params.clone();
        for (name, value) in &message.params {
            merged.insert(name.clone(), value.clone());
        }
        LocalizedMessage::new(message.key.clone(), merged)
    }

    /// Render a resolved message
    fn translate(&self, message: &LocalizedMessage) -> String;
}

/// Supplies per-locale localizations and the process-ambient current locale
pub trait LocalizationProvider: Send + Sync {
    fn current_locale(&self) -> Locale;

    fn translator(&self) -> Arc<dyn Translator>;

    fn number_localization(&self, locale: &Locale) -> Arc<dyn NumberLocalization>;

    fn date_time_localization(&self, locale: &Locale) -> Arc<dyn DateTimeLocalization>;
}
