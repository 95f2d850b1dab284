//! The number kind
//!
//! Parsing, formatting and syntax validation delegate to the locale's
//! number localization; the default format uses locale grouping and up to
//! three fraction digits unless the definition or a per-call override says
//! otherwise.

use std::sync::Arc;

use crate::context::DataTypeContext;
use crate::definition::{NumberFormatOptions, TypeDefinition};
use crate::error::{DataTypeError, Result};
use crate::locale::Locale;
use crate::localization::{NumberLocalization, NUMBER_FORMAT_ERROR};
use crate::types::{DataType, ParseResult, TypeCore};
use crate::validation::ValidationErrors;
use crate::validators::number::number_validators;
use crate::value::{Value, NUMBER_KIND};

const ERROR_MAPPINGS: &[(&str, &str)] = &[(NUMBER_FORMAT_ERROR, "format")];

pub struct NumberType {
    core: TypeCore,
    format_options: NumberFormatOptions,
    localization: Option<Arc<dyn NumberLocalization>>,
}

impl NumberType {
    /// Constructor registered for the `number` kind tag
    pub fn construct(definition: TypeDefinition) -> Result<Box<dyn DataType>> {
        let format_options = definition
            .format
            .as_ref()
            .and_then(|format| format.as_number().copied())
            .unwrap_or_default();

        Ok(Box::new(Self {
            core: TypeCore::new(definition, number_validators()),
            format_options,
            localization: None,
        }))
    }

    /// Locale-specific number localization; the number kind exposes it so
    /// collaborators (masking, form binding) can reuse separators
    pub fn localization(&self) -> Result<&Arc<dyn NumberLocalization>> {
        self.localization.as_ref().ok_or(DataTypeError::NotInitialized)
    }

    fn expect_number(&self, value: &Value) -> Result<f64> {
        value
            .as_number()
            .ok_or_else(|| self.core.wrong_type(NUMBER_KIND, value))
    }
}

impl DataType for NumberType {
    fn kind(&self) -> &str {
        NUMBER_KIND
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
        self.localization = Some(context.provider().number_localization(&locale));
        self.core.init(locale, context)
    }

    fn merge_properties(&mut self, extra: serde_json::Map<String, serde_json::Value>) {
        self.core.merge_properties(extra);
    }

    fn parse(&self, raw: &str) -> Result<ParseResult> {
        match self.validate_format(raw)? {
            Some(errors) => Ok(ParseResult::Invalid(errors)),
            None => {
                let value = self.localization()?.parse(raw)?;
                Ok(ParseResult::Value(Value::Number(value)))
            }
        }
    }

    fn format_with(&self, value: &Value, options: Option<&NumberFormatOptions>) -> Result<String> {
        let number = self.expect_number(value)?;
        let merged = match options {
            Some(options) => self.format_options.merged_with(options),
            None => self.format_options,
        };
        Ok(self.localization()?.format(number, &merged))
    }

    fn validate(&self, value: Option<&Value>) -> Result<Option<ValidationErrors>> {
        let Some(value) = value else {
            return Ok(None);
        };
        let number = self.expect_number(value)?;

        // intrinsic validity first; constraints only run on sound values
        let intrinsic = self
            .core
            .localize(self.localization()?.validate(number), ERROR_MAPPINGS);
        if intrinsic.is_some() {
            return Ok(intrinsic);
        }

        Ok(self.core.validate_constraints(Some(value)))
    }

    fn validate_format(&self, raw: &str) -> Result<Option<ValidationErrors>> {
        Ok(self
            .core
            .localize(self.localization()?.validate_format(raw), ERROR_MAPPINGS))
    }

    fn equals(&self, first: &Value, second: &Value) -> Result<bool> {
        Ok(self.expect_number(first)? == self.expect_number(second)?)
    }

    fn compare(&self, first: &Value, second: &Value) -> Result<f64> {
        Ok(self.expect_number(first)? - self.expect_number(second)?)
    }
}
