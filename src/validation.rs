//! Constraint validator composition and message localization
//!
//! Validators are built in two stages: a factory turns the parameters of a
//! named constraint into a validator closure, and [`compose_validators`]
//! bundles all closures of a definition into one [`ComposedValidator`].
//! Unknown constraint names fail at composition time, not at call time.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::definition::ConstraintParams;
use crate::error::{DataTypeError, Result};
use crate::localization::Translator;
use crate::message::{LocalizedMessage, MessageSpec};
use crate::value::Value;

/// Constraint-specific violation payload, e.g. `{min, include_min, actual}`
pub type ViolationParams = Map<String, Json>;

/// A single failed constraint: its payload plus, when the definition
/// declares a message for it, an attached localized-message descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub params: ViolationParams,
    pub message: Option<LocalizedMessage>,
}

impl Violation {
    pub fn new(params: ViolationParams) -> Self {
        Self {
            params,
            message: None,
        }
    }
}

/// Failed constraints keyed by constraint name; absence means success
pub type ValidationErrors = BTreeMap<String, Violation>;

/// A validator for one constraint. Absent values never produce a violation;
/// required-ness is policy for a separate layer.
pub type Validator = Box<dyn Fn(Option<&Value>) -> Option<ViolationParams> + Send + Sync>;

/// Builds a [`Validator`] from constraint parameters
pub type ValidatorFactory = Arc<dyn Fn(&ConstraintParams) -> Result<Validator> + Send + Sync>;

/// Convenience constructor for a [`ValidatorFactory`]
pub fn validator_factory<F>(factory: F) -> ValidatorFactory
where
    F: Fn(&ConstraintParams) -> Result<Validator> + Send + Sync + 'static,
{
    Arc::new(factory)
}

/// All constraint validators of one type instance, composed
pub struct ComposedValidator {
    validators: Vec<(String, Validator)>,
}

impl ComposedValidator {
    /// A validator over no constraints; always succeeds
    pub fn empty() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Run every constraint validator and collect violations by name.
    /// Returns `None` when no constraint fired, never an empty map.
    pub fn validate(&self, value: Option<&Value>) -> Option<ValidationErrors> {
        let mut violations: Option<ValidationErrors> = None;

        for (name, validator) in &self.validators {
            if let Some(params) = validator(value) {
                violations
                    .get_or_insert_with(ValidationErrors::new)
                    .insert(name.clone(), Violation::new(params));
            }
        }

        violations
    }
}

/// Compose the validators for a set of named constraints.
///
/// Every constraint name is resolved against the factory table; a name
/// without a factory is an `UnknownConstraint` error naming the offending
/// constraint.
pub fn compose_validators(
    constraints: &BTreeMap<String, ConstraintParams>,
    factories: &BTreeMap<String, ValidatorFactory>,
) -> Result<ComposedValidator> {
    let mut validators = Vec::with_capacity(constraints.len());

    for (name, params) in constraints {
        let factory = factories
            .get(name)
            .ok_or_else(|| DataTypeError::UnknownConstraint { name: name.clone() })?;
        validators.push((name.clone(), factory(params)?));
    }

    Ok(ComposedValidator { validators })
}

/// Attach localized messages to violations whose constraint name (after
/// per-kind error-key remapping) has a message declared on the definition.
///
/// The message parameters are the violation payload merged with the
/// message's fixed parameters; violations without a declared message pass
/// through unchanged.
pub fn localize_errors(
    errors: Option<ValidationErrors>,
    messages: &BTreeMap<String, MessageSpec>,
    error_key_to_message_key: &[(&str, &str)],
    translator: &dyn Translator,
) -> Option<ValidationErrors> {
    let errors = errors?;

    let localized = errors
        .into_iter()
        .map(|(error_key, mut violation)| {
            let message_key = error_key_to_message_key
                .iter()
                .find(|(from, _)| *from == error_key)
                .map(|(_, to)| *to)
                .unwrap_or(&error_key);

            if let Some(message) = messages.get(message_key) {
                violation.message = Some(translator.create(message, &violation.params));
            }
            (error_key, violation)
        })
        .collect();

    Some(localized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn always_fails() -> ValidatorFactory {
        validator_factory(|_| {
            Ok(Box::new(|value: Option<&Value>| {
                value.map(|v| {
                    let mut params = ViolationParams::new();
                    params.insert("actual".into(), v.to_json());
                    params
                })
            }) as Validator)
        })
    }

    fn always_passes() -> ValidatorFactory {
        validator_factory(|_| Ok(Box::new(|_: Option<&Value>| None) as Validator))
    }

    #[test]
    fn unknown_constraint_fails_at_composition_time() {
        let constraints = BTreeMap::from([(
            "does_not_exist".to_string(),
            ConstraintParams::from(1.0),
        )]);

        let result = compose_validators(&constraints, &BTreeMap::new());
        assert!(matches!(
            result,
            Err(DataTypeError::UnknownConstraint { name }) if name == "does_not_exist"
        ));
    }

    #[test]
    fn no_violations_is_none_not_empty_map() {
        let constraints = BTreeMap::from([("ok".to_string(), ConstraintParams::from(1.0))]);
        let factories = BTreeMap::from([("ok".to_string(), always_passes())]);

        let composed = compose_validators(&constraints, &factories).unwrap();
        assert!(composed.validate(Some(&Value::from(5.0))).is_none());
    }

    #[test]
    fn violations_collect_by_constraint_name() {
        let constraints = BTreeMap::from([
            ("bad".to_string(), ConstraintParams::from(1.0)),
            ("ok".to_string(), ConstraintParams::from(1.0)),
        ]);
        let factories = BTreeMap::from([
            ("bad".to_string(), always_fails()),
            ("ok".to_string(), always_passes()),
        ]);

        let composed = compose_validators(&constraints, &factories).unwrap();
        let errors = composed.validate(Some(&Value::from(5.0))).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["bad"].params["actual"], json!(5.0));
    }

    #[test]
    fn absent_value_never_fires_constraints() {
        let constraints = BTreeMap::from([("bad".to_string(), ConstraintParams::from(1.0))]);
        let factories = BTreeMap::from([("bad".to_string(), always_fails())]);

        let composed = compose_validators(&constraints, &factories).unwrap();
        assert!(composed.validate(None).is_none());
    }
}
