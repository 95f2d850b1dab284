//! Type prototypes
//!
//! A [`Prototype`] wraps a kind tag, a constructor and a definition into a
//! reusable, locale-less template. It has two usage modes: context-bound
//! (a registry resolves it to cached per-locale instances) and static (its
//! own `parse`/`format`/... methods lazily fix the ambient locale and
//! memoize exactly one instance).

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::context::DataTypeContext;
use crate::definition::{NumberFormatOptions, TypeDefinition};
use crate::error::{DataTypeError, Result};
use crate::locale::Locale;
use crate::types::{DataType, ParseResult, TypeConstructor};
use crate::validation::ValidationErrors;
use crate::value::Value;

pub struct Prototype {
    kind: String,
    constructor: TypeConstructor,
    definition: TypeDefinition,
    context: OnceCell<DataTypeContext>,
    static_locale: OnceCell<Locale>,
    static_instance: OnceCell<Arc<dyn DataType>>,
}

impl Prototype {
    pub fn new(kind: &str, constructor: TypeConstructor, definition: TypeDefinition) -> Self {
        Self {
            kind: kind.to_string(),
            constructor,
            definition,
            context: OnceCell::new(),
            static_locale: OnceCell::new(),
            static_instance: OnceCell::new(),
        }
    }

    /// Kind tag of this prototype
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Definition this prototype is based on; immutable once wrapped
    pub fn definition(&self) -> &TypeDefinition {
        &self.definition
    }

    /// Attach the data-type context. Before this is called, no
    /// instantiation is possible. A second bind is a no-op, so a prototype
    /// shared between registries keeps its first context.
    pub fn bind(&self, context: DataTypeContext) {
        let _ = self.context.set(context);
    }

    /// Construct a new locale-bound instance: build it from the definition,
    /// run one-shot initialization and apply initializer hooks. Never
    /// consults or populates any cache.
    pub fn instantiate(&self, locale: &Locale) -> Result<Arc<dyn DataType>> {
        let context = self.context.get().ok_or(DataTypeError::NotInitialized)?;

        debug!(kind = %self.kind, locale = %locale, "instantiating data type");

        let mut instance = (self.constructor)(self.definition.clone())?;
        instance.init(locale.clone(), context)?;

        if let Some(extra) = context.init_type(instance.as_ref()) {
            instance.merge_properties(extra);
        }

        Ok(Arc::from(instance))
    }

    /// The locale fixed for static usage, resolving it on first use
    pub fn locale(&self) -> Result<&Locale> {
        self.ensure_locale()
    }

    /// Properties of the static instance
    pub fn properties(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        Ok(self.ensure_type()?.properties().clone())
    }

    pub fn parse(&self, raw: &str) -> Result<ParseResult> {
        self.ensure_type()?.parse(raw)
    }

    pub fn format(&self, value: &Value) -> Result<String> {
        self.ensure_type()?.format(value)
    }

    pub fn format_with(
        &self,
        value: &Value,
        options: Option<&NumberFormatOptions>,
    ) -> Result<String> {
        self.ensure_type()?.format_with(value, options)
    }

    pub fn validate(&self, value: Option<&Value>) -> Result<Option<ValidationErrors>> {
        self.ensure_type()?.validate(value)
    }

    pub fn validate_format(&self, raw: &str) -> Result<Option<ValidationErrors>> {
        self.ensure_type()?.validate_format(raw)
    }

    pub fn equals(&self, first: &Value, second: &Value) -> Result<bool> {
        self.ensure_type()?.equals(first, second)
    }

    pub fn compare(&self, first: &Value, second: &Value) -> Result<f64> {
        self.ensure_type()?.compare(first, second)
    }

    /// Resolve the ambient current locale once and fix it permanently for
    /// this prototype; locale changes after that are never observed in
    /// static mode.
    fn ensure_locale(&self) -> Result<&Locale> {
        self.static_locale
            .get_or_try_init(|| Ok(self.static_context()?.provider().current_locale()))
    }

    /// Lazily create and memoize the single static-mode instance
    fn ensure_type(&self) -> Result<&Arc<dyn DataType>> {
        self.static_instance.get_or_try_init(|| {
            let locale = self.ensure_locale()?.clone();
            self.instantiate(&locale)
        })
    }

    fn static_context(&self) -> Result<&DataTypeContext> {
        let context = self.context.get().ok_or(DataTypeError::NotInitialized)?;
        if !context.use_static() {
            return Err(DataTypeError::StaticUsageDisabled);
        }
        Ok(context)
    }
}
