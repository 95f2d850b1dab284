//! Type definitions
//!
//! A [`TypeDefinition`] is the declarative, immutable-after-use description
//! of a data type: formatting options, named constraints, validator
//! factories for custom constraints, localizable messages and free-form
//! properties. Definitions are plain data; merging two of them with
//! [`TypeDefinition::inherit`] always produces a new definition.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use regex::Regex;
use serde_json::{Map, Value as Json};

use crate::message::MessageSpec;
use crate::validation::ValidatorFactory;
use crate::value::Value;

/// Formatting options of a type.
///
/// A pattern is a primitive format: specialization replaces it wholesale.
/// Number options are structured: specialization merges them field by field.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatSpec {
    /// A pattern string, e.g. `M/d/yyyy` for date types
    Pattern(String),
    /// Structured numeric formatting options
    Number(NumberFormatOptions),
}

impl FormatSpec {
    pub fn as_pattern(&self) -> Option<&str> {
        match self {
            FormatSpec::Pattern(p) => Some(p),
            FormatSpec::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<&NumberFormatOptions> {
        match self {
            FormatSpec::Number(options) => Some(options),
            FormatSpec::Pattern(_) => None,
        }
    }
}

impl From<&str> for FormatSpec {
    fn from(pattern: &str) -> Self {
        FormatSpec::Pattern(pattern.to_string())
    }
}

impl From<NumberFormatOptions> for FormatSpec {
    fn from(options: NumberFormatOptions) -> Self {
        FormatSpec::Number(options)
    }
}

/// Fraction-digit bounds for number formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberFormatOptions {
    pub minimum_fraction_digits: Option<u32>,
    pub maximum_fraction_digits: Option<u32>,
}

impl NumberFormatOptions {
    pub fn min_fraction_digits(digits: u32) -> Self {
        Self {
            minimum_fraction_digits: Some(digits),
            ..Self::default()
        }
    }

    pub fn max_fraction_digits(digits: u32) -> Self {
        Self {
            maximum_fraction_digits: Some(digits),
            ..Self::default()
        }
    }

    /// Overlay `other` on top of `self`, field by field
    pub fn merged_with(&self, other: &NumberFormatOptions) -> Self {
        Self {
            minimum_fraction_digits: other
                .minimum_fraction_digits
                .or(self.minimum_fraction_digits),
            maximum_fraction_digits: other
                .maximum_fraction_digits
                .or(self.maximum_fraction_digits),
        }
    }
}

/// Parameters of a single named constraint.
///
/// Built-in boundary constraints accept either a bare value (inclusive by
/// default) or a structured form with explicit inclusivity flags; ranges
/// accept an ordered pair (both bounds inclusive) or a structured form with
/// independent flags. Custom constraints carry arbitrary JSON.
#[derive(Debug, Clone)]
pub enum ConstraintParams {
    /// A boolean switch, e.g. `integral`
    Flag(bool),
    /// A bare boundary or length value, inclusive by default
    Bare(Value),
    /// A boundary with an explicit inclusivity flag
    Bound { value: Value, include: bool },
    /// An ordered pair of bounds, both inclusive
    Pair(Value, Value),
    /// A range with independent inclusivity flags per bound
    Range {
        min: Value,
        max: Value,
        include_min: bool,
        include_max: bool,
    },
    /// A match predicate for text values
    Pattern(Regex),
    /// Free-form parameters for custom constraints
    Custom(Json),
}

impl ConstraintParams {
    pub fn bound(value: impl Into<Value>, include: bool) -> Self {
        ConstraintParams::Bound {
            value: value.into(),
            include,
        }
    }

    pub fn pair(min: impl Into<Value>, max: impl Into<Value>) -> Self {
        ConstraintParams::Pair(min.into(), max.into())
    }

    pub fn range(
        min: impl Into<Value>,
        max: impl Into<Value>,
        include_min: bool,
        include_max: bool,
    ) -> Self {
        ConstraintParams::Range {
            min: min.into(),
            max: max.into(),
            include_min,
            include_max,
        }
    }
}

impl From<bool> for ConstraintParams {
    fn from(flag: bool) -> Self {
        ConstraintParams::Flag(flag)
    }
}

impl From<f64> for ConstraintParams {
    fn from(value: f64) -> Self {
        ConstraintParams::Bare(Value::Number(value))
    }
}

impl From<i64> for ConstraintParams {
    fn from(value: i64) -> Self {
        ConstraintParams::Bare(Value::Number(value as f64))
    }
}

impl From<NaiveDateTime> for ConstraintParams {
    fn from(value: NaiveDateTime) -> Self {
        ConstraintParams::Bare(Value::DateTime(value))
    }
}

impl From<Regex> for ConstraintParams {
    fn from(pattern: Regex) -> Self {
        ConstraintParams::Pattern(pattern)
    }
}

impl From<Json> for ConstraintParams {
    fn from(params: Json) -> Self {
        ConstraintParams::Custom(params)
    }
}

/// The declarative description of a data type
#[derive(Clone, Default)]
pub struct TypeDefinition {
    /// Kind-specific formatting options
    pub format: Option<FormatSpec>,
    /// Named constraints checked by `validate`
    pub constraints: BTreeMap<String, ConstraintParams>,
    /// Validator factories for constraints outside the built-in set
    pub validators: BTreeMap<String, ValidatorFactory>,
    /// Localizable messages attached to violations by constraint name
    pub messages: BTreeMap<String, MessageSpec>,
    /// Derived metadata computed during instantiation; never inherited
    pub properties: Map<String, Json>,
    /// Free-form top-level fields preserved across specialization
    pub extensions: Map<String, Json>,
}

impl TypeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: impl Into<FormatSpec>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn constraint(mut self, name: &str, params: impl Into<ConstraintParams>) -> Self {
        self.constraints.insert(name.to_string(), params.into());
        self
    }

    pub fn message(mut self, name: &str, message: impl Into<MessageSpec>) -> Self {
        self.messages.insert(name.to_string(), message.into());
        self
    }

    pub fn validator(mut self, name: &str, factory: ValidatorFactory) -> Self {
        self.validators.insert(name.to_string(), factory);
        self
    }

    pub fn property(mut self, name: &str, value: Json) -> Self {
        self.properties.insert(name.to_string(), value);
        self
    }

    pub fn extension(mut self, name: &str, value: Json) -> Self {
        self.extensions.insert(name.to_string(), value);
        self
    }

    /// Merge a base definition with an overriding one.
    ///
    /// Constraints, validators, messages and extensions merge field-wise:
    /// names only in the base are retained, names in both take the override,
    /// names only in the override are added. A primitive format on either
    /// side is replaced wholesale; two structured formats merge field by
    /// field. Properties are never inherited.
    ///
    /// Pure: neither input is modified and equal inputs give structurally
    /// equal output.
    pub fn inherit(base: &TypeDefinition, overriding: &TypeDefinition) -> TypeDefinition {
        TypeDefinition {
            format: merge_formats(base.format.as_ref(), overriding.format.as_ref()),
            constraints: merge_maps(&base.constraints, &overriding.constraints),
            validators: merge_maps(&base.validators, &overriding.validators),
            messages: merge_maps(&base.messages, &overriding.messages),
            properties: overriding.properties.clone(),
            extensions: merge_json_maps(&base.extensions, &overriding.extensions),
        }
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDefinition")
            .field("format", &self.format)
            .field("constraints", &self.constraints)
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .field("messages", &self.messages)
            .field("properties", &self.properties)
            .field("extensions", &self.extensions)
            .finish()
    }
}

fn merge_formats(base: Option<&FormatSpec>, overriding: Option<&FormatSpec>) -> Option<FormatSpec> {
    match (base, overriding) {
        (Some(FormatSpec::Number(base)), Some(FormatSpec::Number(overriding))) => {
            Some(FormatSpec::Number(base.merged_with(overriding)))
        }
        // A primitive format on either side replaces instead of merging
        (base, overriding) => overriding.or(base).cloned(),
    }
}

fn merge_maps<V: Clone>(
    base: &BTreeMap<String, V>,
    overriding: &BTreeMap<String, V>,
) -> BTreeMap<String, V> {
    let mut merged = base.clone();
    for (name, value) in overriding {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

fn merge_json_maps(base: &Map<String, Json>, overriding: &Map<String, Json>) -> Map<String, Json> {
    let mut merged = base.clone();
    for (name, value) in overriding {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inherit_merges_constraints_field_wise() {
        let base = TypeDefinition::new()
            .constraint("min", 10.0)
            .message("min", "msg_min");
        let overriding = TypeDefinition::new().constraint("max", 20.0);

        let merged = TypeDefinition::inherit(&base, &overriding);
        assert!(merged.constraints.contains_key("min"));
        assert!(merged.constraints.contains_key("max"));
        assert_eq!(merged.messages["min"], MessageSpec::new("msg_min"));
    }

    #[test]
    fn inherit_overrides_shared_constraint_names() {
        let base = TypeDefinition::new().constraint("min", 10.0);
        let overriding = TypeDefinition::new().constraint("min", 20.0);

        let merged = TypeDefinition::inherit(&base, &overriding);
        match &merged.constraints["min"] {
            ConstraintParams::Bare(Value::Number(n)) => assert_eq!(*n, 20.0),
            other => panic!("unexpected params: {other:?}"),
        }
    }

    #[test]
    fn inherit_replaces_primitive_formats_wholesale() {
        let base = TypeDefinition::new().with_format("M/d/yyyy");
        let overriding = TypeDefinition::new().with_format("d/M/yyyy");

        let merged = TypeDefinition::inherit(&base, &overriding);
        assert_eq!(merged.format, Some(FormatSpec::Pattern("d/M/yyyy".into())));

        let kept = TypeDefinition::inherit(&base, &TypeDefinition::new());
        assert_eq!(kept.format, Some(FormatSpec::Pattern("M/d/yyyy".into())));
    }

    #[test]
    fn inherit_merges_structured_formats_field_wise() {
        let base = TypeDefinition::new()
            .with_format(NumberFormatOptions::min_fraction_digits(2));
        let overriding = TypeDefinition::new()
            .with_format(NumberFormatOptions::max_fraction_digits(4));

        let merged = TypeDefinition::inherit(&base, &overriding);
        let options = merged.format.unwrap();
        assert_eq!(
            options.as_number(),
            Some(&NumberFormatOptions {
                minimum_fraction_digits: Some(2),
                maximum_fraction_digits: Some(4),
            })
        );
    }

    #[test]
    fn inherit_never_carries_properties() {
        let base = TypeDefinition::new().property("max_length", json!(10));
        let merged = TypeDefinition::inherit(&base, &TypeDefinition::new());
        assert!(merged.properties.is_empty());

        let overriding = TypeDefinition::new().property("mask", json!("##-##"));
        let merged = TypeDefinition::inherit(&base, &overriding);
        assert_eq!(merged.properties.get("mask"), Some(&json!("##-##")));
        assert!(merged.properties.get("max_length").is_none());
    }

    #[test]
    fn inherit_preserves_extension_fields() {
        let base = TypeDefinition::new().extension("abc", json!(1));
        let merged = TypeDefinition::inherit(&base, &TypeDefinition::new().constraint("min", 10.0));
        assert_eq!(merged.extensions.get("abc"), Some(&json!(1)));
    }

    #[test]
    fn inherit_is_pure() {
        let base = TypeDefinition::new().constraint("min", 10.0);
        let overriding = TypeDefinition::new().constraint("min", 20.0);

        let first = TypeDefinition::inherit(&base, &overriding);
        let second = TypeDefinition::inherit(&base, &overriding);
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
        assert!(matches!(
            base.constraints["min"],
            ConstraintParams::Bare(Value::Number(n)) if n == 10.0
        ));
    }
}
