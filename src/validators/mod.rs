//! Built-in validator factory tables
//!
//! One table per kind. Number and date share the boundary constraints
//! (`min`, `max`, `range`, `integral`); text carries the length and pattern
//! constraints. Tables are merged under the definition's own validators, so
//! a definition can override a built-in by name.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::Value as Json;

use crate::definition::ConstraintParams;
use crate::error::{DataTypeError, Result};
use crate::validation::{ValidatorFactory, ViolationParams};
use crate::value::Value;

pub mod date;
pub mod number;
pub mod text;

mod bounds;

/// Which scalar variant a boundary constraint of a kind must carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarKind {
    Number,
    Date,
}

impl ScalarKind {
    fn accepts(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarKind::Number, Value::Number(_)) | (ScalarKind::Date, Value::DateTime(_))
        )
    }

    fn name(self) -> &'static str {
        match self {
            ScalarKind::Number => "number",
            ScalarKind::Date => "date",
        }
    }
}

/// Compare two values of the same scalar variant
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::DateTime(a), Value::DateTime(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Extract a boundary value and its inclusivity flag (inclusive by default)
pub(crate) fn bound_params(
    name: &str,
    params: &ConstraintParams,
    expected: ScalarKind,
) -> Result<(Value, bool)> {
    let (value, include) = match params {
        ConstraintParams::Bare(value) => (value.clone(), true),
        ConstraintParams::Bound { value, include } => (value.clone(), *include),
        _ => return Err(invalid(name, "expected a boundary value")),
    };

    if expected.accepts(&value) {
        Ok((value, include))
    } else {
        Err(invalid(
            name,
            &format!("boundary must be a {}", expected.name()),
        ))
    }
}

/// Extract range bounds and their inclusivity flags (both inclusive for the
/// ordered-pair form)
pub(crate) fn range_params(
    name: &str,
    params: &ConstraintParams,
    expected: ScalarKind,
) -> Result<(Value, Value, bool, bool)> {
    let (min, max, include_min, include_max) = match params {
        ConstraintParams::Pair(min, max) => (min.clone(), max.clone(), true, true),
        ConstraintParams::Range {
            min,
            max,
            include_min,
            include_max,
        } => (min.clone(), max.clone(), *include_min, *include_max),
        _ => return Err(invalid(name, "expected a range")),
    };

    if expected.accepts(&min) && expected.accepts(&max) {
        Ok((min, max, include_min, include_max))
    } else {
        Err(invalid(
            name,
            &format!("range bounds must be {}s", expected.name()),
        ))
    }
}

pub(crate) fn invalid(name: &str, reason: &str) -> DataTypeError {
    DataTypeError::InvalidConstraint {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

pub(crate) fn violation(entries: &[(&str, Json)]) -> ViolationParams {
    let mut params = ViolationParams::new();
    for (name, value) in entries {
        params.insert((*name).to_string(), value.clone());
    }
    params
}

/// Merge a kind's default factory table under the definition's own
/// validators; definition entries win on shared names
pub(crate) fn with_defaults(
    defined: &BTreeMap<String, ValidatorFactory>,
    defaults: BTreeMap<String, ValidatorFactory>,
) -> BTreeMap<String, ValidatorFactory> {
    let mut table = defaults;
    for (name, factory) in defined {
        table.insert(name.clone(), factory.clone());
    }
    table
}
