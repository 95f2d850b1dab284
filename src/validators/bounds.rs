//! Boundary constraints shared by the number and date kinds

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::json;

use crate::definition::ConstraintParams;
use crate::error::Result;
use crate::validation::{validator_factory, Validator, ValidatorFactory};
use crate::value::Value;

use super::{bound_params, compare_values, invalid, range_params, violation, ScalarKind};

fn satisfies(ordering: Option<Ordering>, include: bool, allowed: Ordering) -> bool {
    match ordering {
        Some(ordering) => ordering == allowed || (include && ordering == Ordering::Equal),
        None => false,
    }
}

fn min_validator(params: &ConstraintParams, scalar: ScalarKind) -> Result<Validator> {
    let (bound, include) = bound_params("min", params, scalar)?;

    Ok(Box::new(move |value: Option<&Value>| {
        let value = value?;
        if satisfies(compare_values(value, &bound), include, Ordering::Greater) {
            None
        } else {
            Some(violation(&[
                ("min", bound.to_json()),
                ("include_min", json!(include)),
                ("actual", value.to_json()),
            ]))
        }
    }))
}

fn max_validator(params: &ConstraintParams, scalar: ScalarKind) -> Result<Validator> {
    let (bound, include) = bound_params("max", params, scalar)?;

    Ok(Box::new(move |value: Option<&Value>| {
        let value = value?;
        if satisfies(compare_values(value, &bound), include, Ordering::Less) {
            None
        } else {
            Some(violation(&[
                ("max", bound.to_json()),
                ("include_max", json!(include)),
                ("actual", value.to_json()),
            ]))
        }
    }))
}

fn range_validator(params: &ConstraintParams, scalar: ScalarKind) -> Result<Validator> {
    let (min, max, include_min, include_max) = range_params("range", params, scalar)?;

    Ok(Box::new(move |value: Option<&Value>| {
        let value = value?;
        let above_min = satisfies(compare_values(value, &min), include_min, Ordering::Greater);
        let below_max = satisfies(compare_values(value, &max), include_max, Ordering::Less);
        if above_min && below_max {
            None
        } else {
            Some(violation(&[
                ("min", min.to_json()),
                ("include_min", json!(include_min)),
                ("max", max.to_json()),
                ("include_max", json!(include_max)),
                ("actual", value.to_json()),
            ]))
        }
    }))
}

fn integral_validator(params: &ConstraintParams) -> Result<Validator> {
    let required = match params {
        ConstraintParams::Flag(flag) => *flag,
        _ => return Err(invalid("integral", "expected a boolean flag")),
    };

    Ok(Box::new(move |value: Option<&Value>| {
        let number = value?.as_number()?;
        if required && number.trunc() != number {
            Some(violation(&[("actual", json!(number))]))
        } else {
            None
        }
    }))
}

/// The `min`/`max`/`range`/`integral` factory table for a scalar kind
pub(crate) fn bound_validators(scalar: ScalarKind) -> BTreeMap<String, ValidatorFactory> {
    BTreeMap::from([
        (
            "min".to_string(),
            validator_factory(move |params| min_validator(params, scalar)),
        ),
        (
            "max".to_string(),
            validator_factory(move |params| max_validator(params, scalar)),
        ),
        (
            "range".to_string(),
            validator_factory(move |params| range_validator(params, scalar)),
        ),
        (
            "integral".to_string(),
            validator_factory(integral_validator),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ViolationParams;

    fn check(validator: &Validator, value: f64) -> Option<ViolationParams> {
        validator(Some(&Value::from(value)))
    }

    #[test]
    fn bare_min_is_inclusive() {
        let validator = min_validator(&ConstraintParams::from(10.0), ScalarKind::Number).unwrap();
        assert!(check(&validator, 10.0).is_none());
        let params = check(&validator, 9.0).unwrap();
        assert_eq!(params["min"], json!(10.0));
        assert_eq!(params["include_min"], json!(true));
        assert_eq!(params["actual"], json!(9.0));
    }

    #[test]
    fn exclusive_min_rejects_the_bound() {
        let validator =
            min_validator(&ConstraintParams::bound(10.0, false), ScalarKind::Number).unwrap();
        assert!(check(&validator, 10.0).is_some());
        assert!(check(&validator, 10.5).is_none());
    }

    #[test]
    fn bare_max_is_inclusive() {
        let validator = max_validator(&ConstraintParams::from(20.0), ScalarKind::Number).unwrap();
        assert!(check(&validator, 20.0).is_none());
        assert!(check(&validator, 20.1).is_some());
    }

    #[test]
    fn pair_range_is_inclusive_on_both_bounds() {
        let validator =
            range_validator(&ConstraintParams::pair(1.0, 5.0), ScalarKind::Number).unwrap();
        assert!(check(&validator, 1.0).is_none());
        assert!(check(&validator, 5.0).is_none());
        let params = check(&validator, 5.5).unwrap();
        assert_eq!(params["min"], json!(1.0));
        assert_eq!(params["max"], json!(5.0));
        assert_eq!(params["actual"], json!(5.5));
    }

    #[test]
    fn structured_range_honours_per_bound_flags() {
        let validator = range_validator(
            &ConstraintParams::range(1.0, 5.0, false, true),
            ScalarKind::Number,
        )
        .unwrap();
        assert!(check(&validator, 1.0).is_some());
        assert!(check(&validator, 5.0).is_none());
    }

    #[test]
    fn integral_fires_on_fractions_only() {
        let validator = integral_validator(&ConstraintParams::from(true)).unwrap();
        assert!(check(&validator, 3.0).is_none());
        assert_eq!(check(&validator, 3.5).unwrap()["actual"], json!(3.5));

        let disabled = integral_validator(&ConstraintParams::from(false)).unwrap();
        assert!(check(&disabled, 3.5).is_none());
    }

    #[test]
    fn absent_value_never_fires() {
        let validator = min_validator(&ConstraintParams::from(10.0), ScalarKind::Number).unwrap();
        assert!(validator(None).is_none());
    }

    #[test]
    fn number_bound_rejects_date_parameters() {
        let date = chrono::NaiveDate::from_ymd_opt(2019, 4, 25)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let result = min_validator(&ConstraintParams::from(date), ScalarKind::Number);
        assert!(result.is_err());
    }
}
