//! Custom constraints and custom kinds

use std::sync::Arc;

use datakind::test_support::SimpleLocalizationProvider;
use datakind::types::NumberType;
use datakind::{
    custom_type, number_type, validator_factory, ConstraintParams, DataType, DataTypeContext,
    DataTypeError, DataTypeRegistry, ParseResult, Result, TypeDefinition, Validator, Value,
};
use serde_json::json;

fn registry() -> DataTypeRegistry {
    DataTypeRegistry::new(DataTypeContext::new(Arc::new(
        SimpleLocalizationProvider::en_us(),
    )))
}

#[test]
fn unknown_constraints_fail_on_first_use() {
    let registry = registry();
    registry
        .register(
            "Broken",
            number_type(TypeDefinition::new().constraint("does_not_exist", true)),
        )
        .unwrap();

    assert!(matches!(
        registry.get("Broken"),
        Err(DataTypeError::UnknownConstraint { name }) if name == "does_not_exist"
    ));
}

fn even_validator(params: &ConstraintParams) -> Result<Validator> {
    let required = matches!(params, ConstraintParams::Flag(true));
    Ok(Box::new(move |value: Option<&Value>| {
        let number = value?.as_number()?;
        if required && number.rem_euclid(2.0) != 0.0 {
            let mut violation = serde_json::Map::new();
            violation.insert("actual".to_string(), json!(number));
            Some(violation)
        } else {
            None
        }
    }))
}

#[test]
fn definitions_may_carry_their_own_validators() {
    let registry = registry();
    registry
        .register(
            "Even",
            number_type(
                TypeDefinition::new()
                    .constraint("even", true)
                    .validator("even", validator_factory(even_validator))
                    .message("even", "msg_even"),
            ),
        )
        .unwrap();
    let even = registry.get("Even").unwrap();

    let errors = even.validate(Some(&Value::from(3.0))).unwrap().unwrap();
    assert_eq!(errors["even"].params["actual"], json!(3.0));
    assert_eq!(errors["even"].message.as_ref().unwrap().key, "msg_even");
    assert!(even.validate(Some(&Value::from(4.0))).unwrap().is_none());
}

#[test]
fn definition_validators_may_replace_built_ins() {
    let registry = registry();
    // a `min` that ignores its bound and never fires
    registry
        .register(
            "Lenient",
            number_type(
                TypeDefinition::new()
                    .constraint("min", 10.0)
                    .validator("min", validator_factory(|_| Ok(Box::new(|_| None)))),
            ),
        )
        .unwrap();
    let lenient = registry.get("Lenient").unwrap();
    assert!(lenient.validate(Some(&Value::from(0.0))).unwrap().is_none());
}

/// A number kind that formats with a trailing percent sign
struct PercentType {
    inner: Box<dyn DataType>,
}

impl PercentType {
    fn construct(definition: TypeDefinition) -> Result<Box<dyn DataType>> {
        Ok(Box::new(Self {
            inner: NumberType::construct(definition)?,
        }))
    }
}

impl DataType for PercentType {
    fn kind(&self) -> &str {
        "percent"
    }

    fn definition(&self) -> &TypeDefinition {
        self.inner.definition()
    }

    fn locale(&self) -> &datakind::Locale {
        self.inner.locale()
    }

    fn properties(&self) -> &serde_json::Map<String, serde_json::Value> {
        self.inner.properties()
    }

    fn init(&mut self, locale: datakind::Locale, context: &DataTypeContext) -> Result<()> {
        self.inner.init(locale, context)
    }

    fn merge_properties(&mut self, extra: serde_json::Map<String, serde_json::Value>) {
        self.inner.merge_properties(extra);
    }

    fn parse(&self, raw: &str) -> Result<ParseResult> {
        self.inner.parse(raw.trim_end_matches('%'))
    }

    fn format_with(
        &self,
        value: &Value,
        options: Option<&datakind::NumberFormatOptions>,
    ) -> Result<String> {
        Ok(format!("{}%", self.inner.format_with(value, options)?))
    }

    fn validate(
        &self,
        value: Option<&Value>,
    ) -> Result<Option<datakind::ValidationErrors>> {
        self.inner.validate(value)
    }

    fn validate_format(&self, raw: &str) -> Result<Option<datakind::ValidationErrors>> {
        self.inner.validate_format(raw.trim_end_matches('%'))
    }
}

#[test]
fn custom_kinds_plug_in_through_a_constructor() {
    let registry = registry();
    registry
        .register(
            "Percent",
            custom_type(
                "percent",
                PercentType::construct,
                TypeDefinition::new().constraint("range", ConstraintParams::pair(0.0, 100.0)),
            ),
        )
        .unwrap();
    let percent = registry.get("Percent").unwrap();

    assert_eq!(percent.kind(), "percent");
    assert_eq!(percent.format(&Value::from(12.5)).unwrap(), "12.5%");
    let parsed = percent.parse("12.5%").unwrap();
    assert_eq!(parsed.value().unwrap(), &Value::from(12.5));
    assert!(percent
        .validate(Some(&Value::from(120.0)))
        .unwrap()
        .is_some());

    // operations the custom kind does not define stay unsupported
    assert!(matches!(
        percent.equals(&Value::from(1.0), &Value::from(1.0)),
        Err(DataTypeError::UnsupportedOperation { kind, .. }) if kind == "percent"
    ));
}
