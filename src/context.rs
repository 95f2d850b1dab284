//! Data-type context
//!
//! The context binds the engine to its collaborators: the localization
//! provider, the static-usage policy and initializer hooks that contribute
//! extra computed properties at instance-initialization time (an
//! input-masking layer attaching a mask derived from constraints, for
//! example).

use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::localization::LocalizationProvider;
use crate::types::DataType;

/// Contributes additional computed properties to instances at init time
pub trait TypeInitializer: Send + Sync {
    fn init_type(&self, instance: &dyn DataType) -> Option<Map<String, Json>>;
}

/// Everything a prototype needs to instantiate locale-bound types
#[derive(Clone)]
pub struct DataTypeContext {
    provider: Arc<dyn LocalizationProvider>,
    use_static: bool,
    initializers: Vec<Arc<dyn TypeInitializer>>,
}

impl DataTypeContext {
    pub fn new(provider: Arc<dyn LocalizationProvider>) -> Self {
        Self {
            provider,
            use_static: false,
            initializers: Vec::new(),
        }
    }

    /// Allow prototypes to be used directly, without a registry lookup
    pub fn with_static_usage(mut self, use_static: bool) -> Self {
        self.use_static = use_static;
        self
    }

    pub fn with_initializer(mut self, initializer: Arc<dyn TypeInitializer>) -> Self {
        self.initializers.push(initializer);
        self
    }

    pub fn provider(&self) -> &Arc<dyn LocalizationProvider> {
        &self.provider
    }

    pub fn use_static(&self) -> bool {
        self.use_static
    }

    /// Run every initializer against a freshly initialized instance and
    /// collect the properties they contribute, in registration order
    pub fn init_type(&self, instance: &dyn DataType) -> Option<Map<String, Json>> {
        let mut contributed: Option<Map<String, Json>> = None;

        for initializer in &self.initializers {
            if let Some(properties) = initializer.init_type(instance) {
                let merged = contributed.get_or_insert_with(Map::new);
                for (name, value) in properties {
                    merged.insert(name, value);
                }
            }
        }

        contributed
    }
}
