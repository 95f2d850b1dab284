//! The text kind
//!
//! Text parsing is the identity; there is no locale-specific text syntax.
//! A `max_length` constraint is mirrored into `properties.max_length` at
//! construction so downstream consumers can read a simple property instead
//! of inspecting constraints.

use serde_json::json;

use crate::context::DataTypeContext;
use crate::definition::{ConstraintParams, NumberFormatOptions, TypeDefinition};
use crate::error::Result;
use crate::locale::Locale;
use crate::types::{DataType, ParseResult, TypeCore};
use crate::validation::ValidationErrors;
use crate::validators::text::text_validators;
use crate::value::{Value, TEXT_KIND};

fn normalize_definition(mut definition: TypeDefinition) -> TypeDefinition {
    if let Some(ConstraintParams::Bare(Value::Number(max_length))) =
        definition.constraints.get("max_length")
    {
        definition
            .properties
            .insert("max_length".to_string(), json!(max_length));
    }
    definition
}

pub struct TextType {
    core: TypeCore,
}

impl TextType {
    /// Constructor registered for the `text` kind tag
    pub fn construct(definition: TypeDefinition) -> Result<Box<dyn DataType>> {
        Ok(Box::new(Self {
            core: TypeCore::new(normalize_definition(definition), text_validators()),
        }))
    }

    fn expect_text<'a>(&self, value: &'a Value) -> Result<&'a str> {
        value
            .as_text()
            .ok_or_else(|| self.core.wrong_type(TEXT_KIND, value))
    }
}

impl DataType for TextType {
    fn kind(&self) -> &str {
        TEXT_KIND
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
        self.core.init(locale, context)
    }

    fn merge_properties(&mut self, extra: serde_json::Map<String, serde_json::Value>) {
        self.core.merge_properties(extra);
    }

    fn parse(&self, raw: &str) -> Result<ParseResult> {
        Ok(ParseResult::Value(Value::Text(raw.to_string())))
    }

    fn format_with(&self, value: &Value, _options: Option<&NumberFormatOptions>) -> Result<String> {
        Ok(self.expect_text(value)?.to_string())
    }

    fn validate(&self, value: Option<&Value>) -> Result<Option<ValidationErrors>> {
        let Some(value) = value else {
            return Ok(None);
        };
        self.expect_text(value)?;

        Ok(self.core.validate_constraints(Some(value)))
    }

    fn validate_format(&self, _raw: &str) -> Result<Option<ValidationErrors>> {
        Ok(None)
    }

    fn equals(&self, first: &Value, second: &Value) -> Result<bool> {
        Ok(self.expect_text(first)? == self.expect_text(second)?)
    }

    fn compare(&self, first: &Value, second: &Value) -> Result<f64> {
        let ordering = self.expect_text(first)?.cmp(self.expect_text(second)?);
        Ok(ordering as i8 as f64)
    }
}
