//! Built-in constraints of the text kind
//!
//! Length and pattern constraints only check non-empty values; an empty or
//! absent string never fires them.

use std::collections::BTreeMap;

use regex::Regex;
use serde_json::json;

use crate::definition::ConstraintParams;
use crate::error::Result;
use crate::validation::{validator_factory, Validator, ValidatorFactory};
use crate::value::Value;

use super::{invalid, violation};

fn length_param(name: &str, params: &ConstraintParams) -> Result<usize> {
    match params {
        ConstraintParams::Bare(Value::Number(n)) if *n >= 0.0 && n.fract() == 0.0 => {
            Ok(*n as usize)
        }
        _ => Err(invalid(name, "expected a non-negative integer length")),
    }
}

fn length_pair(name: &str, params: &ConstraintParams) -> Result<(usize, usize)> {
    let (min, max) = match params {
        ConstraintParams::Pair(min, max) => (min, max),
        ConstraintParams::Range { min, max, .. } => (min, max),
        _ => return Err(invalid(name, "expected a pair of lengths")),
    };
    match (min, max) {
        (Value::Number(min), Value::Number(max)) if min.fract() == 0.0 && max.fract() == 0.0 => {
            Ok((*min as usize, *max as usize))
        }
        _ => Err(invalid(name, "expected a pair of lengths")),
    }
}

/// Non-empty text of the checked value, if any
fn checked_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_text).filter(|text| !text.is_empty())
}

fn min_length_validator(params: &ConstraintParams) -> Result<Validator> {
    let required = length_param("min_length", params)?;

    Ok(Box::new(move |value: Option<&Value>| {
        let text = checked_text(value)?;
        if text.chars().count() < required {
            Some(violation(&[
                ("required_length", json!(required)),
                ("actual_length", json!(text.chars().count())),
            ]))
        } else {
            None
        }
    }))
}

fn max_length_validator(params: &ConstraintParams) -> Result<Validator> {
    let required = length_param("max_length", params)?;

    Ok(Box::new(move |value: Option<&Value>| {
        let text = checked_text(value)?;
        if text.chars().count() > required {
            Some(violation(&[
                ("required_length", json!(required)),
                ("actual_length", json!(text.chars().count())),
            ]))
        } else {
            None
        }
    }))
}

fn range_length_validator(params: &ConstraintParams) -> Result<Validator> {
    let (min, max) = length_pair("range_length", params)?;

    Ok(Box::new(move |value: Option<&Value>| {
        let text = checked_text(value)?;
        let length = text.chars().count();
        if length < min || length > max {
            Some(violation(&[
                ("min_length", json!(min)),
                ("max_length", json!(max)),
                ("actual_length", json!(length)),
            ]))
        } else {
            None
        }
    }))
}

fn pattern_validator(params: &ConstraintParams) -> Result<Validator> {
    let pattern: Regex = match params {
        ConstraintParams::Pattern(pattern) => pattern.clone(),
        _ => return Err(invalid("pattern", "expected a regular expression")),
    };

    Ok(Box::new(move |value: Option<&Value>| {
        let text = checked_text(value)?;
        if pattern.is_match(text) {
            None
        } else {
            Some(violation(&[
                ("required_pattern", json!(pattern.as_str())),
                ("actual", json!(text)),
            ]))
        }
    }))
}

/// `min_length`, `max_length`, `range_length` and `pattern` over text values
pub fn text_validators() -> BTreeMap<String, ValidatorFactory> {
    BTreeMap::from([
        (
            "min_length".to_string(),
            validator_factory(min_length_validator),
        ),
        (
            "max_length".to_string(),
            validator_factory(max_length_validator),
        ),
        (
            "range_length".to_string(),
            validator_factory(range_length_validator),
        ),
        ("pattern".to_string(), validator_factory(pattern_validator)),
    ])
}
