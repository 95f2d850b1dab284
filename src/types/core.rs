//! Shared state and behavior of every kind's instance

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::context::DataTypeContext;
use crate::definition::TypeDefinition;
use crate::error::{DataTypeError, Result};
use crate::locale::Locale;
use crate::localization::Translator;
use crate::validation::{
    compose_validators, localize_errors, ComposedValidator, ValidationErrors, ValidatorFactory,
};
use crate::validators::with_defaults;
use crate::value::Value;

/// The part of an instance every kind shares: the definition, the resolved
/// locale, computed properties, the composed constraint validator and the
/// translator used for message localization
pub struct TypeCore {
    definition: TypeDefinition,
    defaults: BTreeMap<String, ValidatorFactory>,
    state: Option<Initialized>,
}

struct Initialized {
    locale: Locale,
    properties: Map<String, Json>,
    validator: ComposedValidator,
    translator: Arc<dyn Translator>,
}

impl TypeCore {
    /// An uninitialized core over a definition and the kind's default
    /// validator factories
    pub fn new(definition: TypeDefinition, defaults: BTreeMap<String, ValidatorFactory>) -> Self {
        Self {
            definition,
            defaults,
            state: None,
        }
    }

    pub fn definition(&self) -> &TypeDefinition {
        &self.definition
    }

    /// Compose the constraint validator and bind the locale. Called exactly
    /// once, before the instance is shared.
    pub fn init(&mut self, locale: Locale, context: &DataTypeContext) -> Result<()> {
        debug_assert!(self.state.is_none(), "instance initialized twice");

        let validator = if self.definition.constraints.is_empty() {
            ComposedValidator::empty()
        } else {
            let table = with_defaults(&self.definition.validators, self.defaults.clone());
            compose_validators(&self.definition.constraints, &table)?
        };

        self.state = Some(Initialized {
            locale,
            properties: self.definition.properties.clone(),
            validator,
            translator: context.provider().translator(),
        });
        Ok(())
    }

    fn initialized(&self) -> &Initialized {
        self.state
            .as_ref()
            .expect("instance is initialized before it is shared")
    }

    pub fn locale(&self) -> &Locale {
        &self.initialized().locale
    }

    pub fn properties(&self) -> &Map<String, Json> {
        &self.initialized().properties
    }

    pub fn merge_properties(&mut self, extra: Map<String, Json>) {
        if let Some(state) = self.state.as_mut() {
            for (name, value) in extra {
                state.properties.insert(name, value);
            }
        }
    }

    /// Run the composed constraint validator and localize its violations
    pub fn validate_constraints(&self, value: Option<&Value>) -> Option<ValidationErrors> {
        let state = self.initialized();
        self.localize(state.validator.validate(value), &[])
    }

    /// Attach declared messages to violations, remapping intrinsic error
    /// keys to public message names first
    pub fn localize(
        &self,
        errors: Option<ValidationErrors>,
        error_key_to_message_key: &[(&str, &str)],
    ) -> Option<ValidationErrors> {
        localize_errors(
            errors,
            &self.definition.messages,
            error_key_to_message_key,
            self.initialized().translator.as_ref(),
        )
    }

    /// Wrong-underlying-type programming error for a kind
    pub fn wrong_type(&self, kind: &str, value: &Value) -> DataTypeError {
        DataTypeError::WrongValueType {
            kind: kind.to_string(),
            actual: value.type_name().to_string(),
        }
    }
}
