//! The date kind
//!
//! A date type must declare a format pattern in its definition; every
//! parse/format path goes through that pattern, never a default. Using a
//! date type without a pattern is a checked error the first time it is
//! exercised.

use std::sync::Arc;

use crate::context::DataTypeContext;
use crate::definition::{NumberFormatOptions, TypeDefinition};
use crate::error::{DataTypeError, Result};
use crate::locale::Locale;
use crate::localization::{DateTimeLocalization, DATE_FORMAT_ERROR, DATE_INVALID_ERROR};
use crate::types::{DataType, ParseResult, TypeCore};
use crate::validation::ValidationErrors;
use crate::validators::date::date_validators;
use crate::value::{Value, DATE_KIND};

const ERROR_MAPPINGS: &[(&str, &str)] = &[
    (DATE_FORMAT_ERROR, "format"),
    (DATE_INVALID_ERROR, "invalid"),
];

pub struct DateTimeType {
    core: TypeCore,
    localization: Option<Arc<dyn DateTimeLocalization>>,
}

impl DateTimeType {
    /// Constructor registered for the `date` kind tag
    pub fn construct(definition: TypeDefinition) -> Result<Box<dyn DataType>> {
        Ok(Box::new(Self {
            core: TypeCore::new(definition, date_validators()),
            localization: None,
        }))
    }

    pub fn localization(&self) -> Result<&Arc<dyn DateTimeLocalization>> {
        self.localization.as_ref().ok_or(DataTypeError::NotInitialized)
    }

    fn pattern(&self) -> Result<&str> {
        self.core
            .definition()
            .format
            .as_ref()
            .and_then(|format| format.as_pattern())
            .ok_or(DataTypeError::MissingDateFormat)
    }

    fn expect_date(&self, value: &Value) -> Result<chrono::NaiveDateTime> {
        value
            .as_date_time()
            .ok_or_else(|| self.core.wrong_type(DATE_KIND, value))
    }
}

impl DataType for DateTimeType {
    fn kind(&self) -> &str {
        DATE_KIND
    }

    fn definition(&self) -> &TypeDefinition {
        self.core.definition()
    }

    fn locale(&self) -> &Locale {
        self.core.locale()
    }

    fn properties(&self) -> &serde_json::Map<String, serde_json::Value> {
        self.core.properties()
    }

    fn init(&mut self, locale: Locale, context: &DataTypeContext) -> Result<()> {
        self.localization = Some(context.provider().date_time_localization(&locale));
        self.core.init(locale, context)
    }

    fn merge_properties(&mut self, extra: serde_json::Map<String, serde_json::Value>) {
        self.core.merge_properties(extra);
    }

    fn parse(&self, raw: &str) -> Result<ParseResult> {
        match self.validate_format(raw)? {
            Some(errors) => Ok(ParseResult::Invalid(errors)),
            None => {
                let value = self.localization()?.parse(raw, self.pattern()?)?;
                Ok(ParseResult::Value(Value::DateTime(value)))
            }
        }
    }

    fn format_with(&self, value: &Value, _options: Option<&NumberFormatOptions>) -> Result<String> {
        let date = self.expect_date(value)?;
        Ok(self.localization()?.format(&date, self.pattern()?))
    }

    fn validate(&self, value: Option<&Value>) -> Result<Option<ValidationErrors>> {
        let Some(value) = value else {
            return Ok(None);
        };
        let date = self.expect_date(value)?;

        // a date that is not a real calendar date short-circuits constraints
        let intrinsic = self
            .core
            .localize(self.localization()?.validate(&date), ERROR_MAPPINGS);
        if intrinsic.is_some() {
            return Ok(intrinsic);
        }

        Ok(self.core.validate_constraints(Some(value)))
    }

    fn validate_format(&self, raw: &str) -> Result<Option<ValidationErrors>> {
        let errors = self.localization()?.validate_format(raw, self.pattern()?);
        Ok(self.core.localize(errors, ERROR_MAPPINGS))
    }

    fn equals(&self, first: &Value, second: &Value) -> Result<bool> {
        Ok(self.expect_date(first)? == self.expect_date(second)?)
    }

    fn compare(&self, first: &Value, second: &Value) -> Result<f64> {
        let difference = self.expect_date(first)?.and_utc().timestamp_millis()
            - self.expect_date(second)?.and_utc().timestamp_millis();
        Ok(difference as f64)
    }
}
