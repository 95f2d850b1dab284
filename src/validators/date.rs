//! Built-in constraints of the date kind

use std::collections::BTreeMap;

use crate::validation::ValidatorFactory;

use super::bounds::bound_validators;
use super::ScalarKind;

/// `min`, `max`, `range` and `integral` over date values
pub fn date_validators() -> BTreeMap<String, ValidatorFactory> {
    bound_validators(ScalarKind::Date)
}
