//! Number kind behavior

use std::sync::Arc;

use datakind::test_support::SimpleLocalizationProvider;
use datakind::{
    number_type, ConstraintParams, DataType, DataTypeContext, DataTypeError, DataTypeRegistry,
    NumberFormatOptions, TypeDefinition, Value,
};
use serde_json::json;

fn instance(definition: TypeDefinition) -> Arc<dyn DataType> {
    let context = DataTypeContext::new(Arc::new(SimpleLocalizationProvider::en_us()));
    let registry =
        DataTypeRegistry::with_types(context, [("Number".to_string(), number_type(definition))])
            .unwrap();
    registry.get("Number").unwrap()
}

#[test]
fn format_uses_locale_grouping_and_three_fraction_digits() {
    let number = instance(TypeDefinition::new());
    assert_eq!(number.format(&Value::from(123456.789)).unwrap(), "123,456.789");
    assert_eq!(number.format(&Value::from(1.23456)).unwrap(), "1.235");
}

#[test]
fn parse_format_round_trip() {
    let number = instance(TypeDefinition::new());
    let formatted = number.format(&Value::from(123456.789)).unwrap();
    let parsed = number.parse(&formatted).unwrap();
    assert!(number
        .equals(parsed.value().unwrap(), &Value::from(123456.789))
        .unwrap());
}

#[test]
fn definition_format_applies_and_per_call_options_override() {
    let number = instance(
        TypeDefinition::new().with_format(NumberFormatOptions::min_fraction_digits(2)),
    );
    assert_eq!(number.format(&Value::from(1.0)).unwrap(), "1.00");

    let options = NumberFormatOptions::min_fraction_digits(3);
    assert_eq!(
        number.format_with(&Value::from(1.0), Some(&options)).unwrap(),
        "1.000"
    );
    // the per-call override leaves the type untouched
    assert_eq!(number.format(&Value::from(1.0)).unwrap(), "1.00");
}

#[test]
fn parse_reports_format_errors_as_data() {
    let number = instance(TypeDefinition::new());
    let result = number.parse("not a number").unwrap();
    assert!(!result.is_valid());
    assert!(result.errors().unwrap().contains_key("number_format"));
}

#[test]
fn validate_format_uses_declared_format_message() {
    let number = instance(TypeDefinition::new().message("format", "msg_number_format"));
    let errors = number.validate_format("abc").unwrap().unwrap();
    let violation = &errors["number_format"];
    let message = violation.message.as_ref().unwrap();
    assert_eq!(message.key, "msg_number_format");
    assert_eq!(message.params["value"], json!("abc"));
}

#[test]
fn format_rejects_wrong_value_type() {
    let number = instance(TypeDefinition::new());
    let result = number.format(&Value::from("12"));
    assert!(matches!(
        result,
        Err(DataTypeError::WrongValueType { kind, actual }) if kind == "number" && actual == "string"
    ));
}

#[test]
fn validate_of_absent_value_is_no_error() {
    let number = instance(TypeDefinition::new().constraint("min", 10.0));
    assert!(number.validate(None).unwrap().is_none());
}

#[test]
fn validate_reports_min_violation_with_payload() {
    let number = instance(TypeDefinition::new().constraint("min", 10.0));
    let errors = number.validate(Some(&Value::from(9.0))).unwrap().unwrap();
    let violation = &errors["min"];
    assert_eq!(violation.params["min"], json!(10.0));
    assert_eq!(violation.params["include_min"], json!(true));
    assert_eq!(violation.params["actual"], json!(9.0));

    assert!(number.validate(Some(&Value::from(10.0))).unwrap().is_none());
}

#[test]
fn validate_attaches_declared_message_with_payload_params() {
    let number = instance(
        TypeDefinition::new()
            .constraint("min", 10.0)
            .message("min", "msg_x"),
    );
    let errors = number.validate(Some(&Value::from(9.0))).unwrap().unwrap();
    let violation = &errors["min"];
    let message = violation.message.as_ref().unwrap();
    assert_eq!(message.key, "msg_x");
    // message parameters equal the raw violation payload
    assert_eq!(json!(message.params), json!(violation.params));
}

#[test]
fn exclusive_bounds_and_ranges() {
    let number = instance(
        TypeDefinition::new().constraint("max", ConstraintParams::bound(20.0, false)),
    );
    assert!(number.validate(Some(&Value::from(20.0))).unwrap().is_some());
    assert!(number.validate(Some(&Value::from(19.9))).unwrap().is_none());

    let ranged = instance(TypeDefinition::new().constraint("range", ConstraintParams::pair(1.0, 5.0)));
    assert!(ranged.validate(Some(&Value::from(5.0))).unwrap().is_none());
    let errors = ranged.validate(Some(&Value::from(6.0))).unwrap().unwrap();
    assert_eq!(errors["range"].params["max"], json!(5.0));
}

#[test]
fn integral_constraint() {
    let number = instance(TypeDefinition::new().constraint("integral", true));
    assert!(number.validate(Some(&Value::from(3.0))).unwrap().is_none());
    let errors = number.validate(Some(&Value::from(3.5))).unwrap().unwrap();
    assert_eq!(errors["integral"].params["actual"], json!(3.5));
}

#[test]
fn equals_and_compare_are_numeric() {
    let number = instance(TypeDefinition::new());
    assert!(number.equals(&Value::from(1.5), &Value::from(1.5)).unwrap());
    assert!(!number.equals(&Value::from(1.5), &Value::from(2.5)).unwrap());
    assert_eq!(number.compare(&Value::from(3.0), &Value::from(1.5)).unwrap(), 1.5);
    assert!(number.compare(&Value::from(1.0), &Value::from(2.0)).unwrap() < 0.0);
}

#[test]
fn localized_separators_drive_parsing() {
    use datakind::test_support::NumberFormatRules;
    use datakind::Locale;

    let de = Locale::parse("de-DE").unwrap();
    let provider = SimpleLocalizationProvider::new(de.clone())
        .with_rules(&de, NumberFormatRules::de_style());
    let context = DataTypeContext::new(Arc::new(provider));
    let registry = DataTypeRegistry::with_types(
        context,
        [("Number".to_string(), number_type(TypeDefinition::new()))],
    )
    .unwrap();
    let number = registry.get("Number").unwrap();

    assert_eq!(number.format(&Value::from(123456.789)).unwrap(), "123.456,789");
    let parsed = number.parse("123.456,789").unwrap();
    assert_eq!(parsed.value().unwrap(), &Value::from(123456.789));
}
