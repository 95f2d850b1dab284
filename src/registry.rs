//! Data-type registry
//!
//! The registry is the context-bound usage mode: prototypes register under
//! external names, and lookups resolve them to locale-bound instances
//! through a per-(name, locale) cache. Re-requesting a name under the same
//! locale returns the identical instance; a different locale yields a
//! distinct one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, trace};

use crate::context::DataTypeContext;
use crate::error::{DataTypeError, Result};
use crate::locale::Locale;
use crate::prototype::Prototype;
use crate::types::DataType;

pub struct DataTypeRegistry {
    context: DataTypeContext,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    prototypes: HashMap<String, Arc<Prototype>>,
    /// First registered name per prototype identity
    names: HashMap<usize, String>,
    /// Instance cache keyed by (locale standard code, type name)
    instances: HashMap<(String, String), Arc<dyn DataType>>,
    dynamic_sequence: u64,
}

fn identity(prototype: &Arc<Prototype>) -> usize {
    Arc::as_ptr(prototype) as usize
}

impl DataTypeRegistry {
    pub fn new(context: DataTypeContext) -> Self {
        Self {
            context,
            state: Mutex::new(State::default()),
        }
    }

    /// Build a registry from a named type set
    pub fn with_types(
        context: DataTypeContext,
        types: impl IntoIterator<Item = (String, Arc<Prototype>)>,
    ) -> Result<Self> {
        let registry = Self::new(context);
        for (name, prototype) in types {
            registry.register(&name, prototype)?;
        }
        Ok(registry)
    }

    /// Register a prototype under an external name. Registering two
    /// distinct prototypes under one name is an error; the same prototype
    /// may carry several names.
    pub fn register(&self, name: &str, prototype: Arc<Prototype>) -> Result<()> {
        let mut state = self.state.lock().expect("registry lock");
        if state.prototypes.contains_key(name) {
            return Err(DataTypeError::DuplicateTypeName {
                name: name.to_string(),
            });
        }

        debug!(name, kind = prototype.kind(), "registering data type");

        // bind the context only on the first registration of this prototype
        let key = identity(&prototype);
        if !state.names.contains_key(&key) {
            state.names.insert(key, name.to_string());
            prototype.bind(self.context.clone());
        }
        state.prototypes.insert(name.to_string(), prototype);
        Ok(())
    }

    /// Register an anonymous prototype under a generated unique name and
    /// return that name
    pub fn register_dynamic(&self, prototype: Arc<Prototype>) -> Result<String> {
        let name = {
            let mut state = self.state.lock().expect("registry lock");
            state.dynamic_sequence += 1;
            format!("dynamic-type-{}", state.dynamic_sequence)
        };
        self.register(&name, prototype)?;
        Ok(name)
    }

    /// Resolve a registered name to an instance for the ambient current
    /// locale
    pub fn get(&self, name: &str) -> Result<Arc<dyn DataType>> {
        let locale = self.context.provider().current_locale();
        self.resolve(name, &locale)
    }

    /// Resolve a registered prototype object to an instance for the ambient
    /// current locale. The prototype must have been registered; anonymous
    /// prototypes go through [`DataTypeRegistry::register_dynamic`] first.
    pub fn get_prototype(&self, prototype: &Arc<Prototype>) -> Result<Arc<dyn DataType>> {
        let name = {
            let state = self.state.lock().expect("registry lock");
            state
                .names
                .get(&identity(prototype))
                .cloned()
                .ok_or_else(|| DataTypeError::UnregisteredPrototype {
                    kind: prototype.kind().to_string(),
                })?
        };
        self.get(&name)
    }

    /// Resolve a registered name to an instance for an explicit locale,
    /// instantiating the prototype once per distinct locale
    pub fn resolve(&self, name: &str, locale: &Locale) -> Result<Arc<dyn DataType>> {
        let key = (locale.standard_code(), name.to_string());

        let mut state = self.state.lock().expect("registry lock");
        if let Some(instance) = state.instances.get(&key) {
            trace!(name, locale = %locale, "data type cache hit");
            return Ok(Arc::clone(instance));
        }

        let prototype = state
            .prototypes
            .get(name)
            .ok_or_else(|| DataTypeError::UnknownTypeName {
                name: name.to_string(),
            })?
            .clone();
        let instance = prototype.instantiate(locale)?;
        state.instances.insert(key, Arc::clone(&instance));
        Ok(instance)
    }
}
