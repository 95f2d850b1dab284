//! Built-in constraints of the number kind

use std::collections::BTreeMap;

use crate::validation::ValidatorFactory;

use super::bounds::bound_validators;
use super::ScalarKind;

/// `min`, `max`, `range` and `integral` over numeric values
pub fn number_validators() -> BTreeMap<String, ValidatorFactory> {
    bound_validators(ScalarKind::Number)
}
