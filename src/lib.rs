//! Datakind
//!
//! A locale-aware data-type engine: declare abstract kinds of values
//! (numbers, dates, text and custom kinds) with formatting, parsing and
//! validation rules that can be inherited, specialized and merged, then
//! instantiated per locale with cached, side-effect-free behavior.
//!
//! ## Architecture
//!
//! ```text
//! TypeDefinition ──(inherit)──► TypeDefinition
//!       │
//!       ▼
//!   Prototype ──(instantiate per locale)──► DataType instance
//!       │                                        │
//!   DataTypeRegistry ◄──(per-(name, locale) cache)┘
//! ```
//!
//! A definition is authored directly or derived from a base definition,
//! wrapped into a [`Prototype`] and registered. On first use for a locale
//! the prototype constructs a kind-specific instance, which composes its
//! constraint validators once; all later `parse`/`format`/`validate`/
//! `equals`/`compare` calls on that locale hit the cached instance.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use datakind::{number_type, DataTypeContext, DataTypeRegistry, TypeDefinition, Value};
//! use datakind::test_support::SimpleLocalizationProvider;
//!
//! # fn main() -> datakind::Result<()> {
//! let amount = number_type(
//!     TypeDefinition::new()
//!         .constraint("min", 0.0)
//!         .message("min", "msg_amount_min"),
//! );
//!
//! let context = DataTypeContext::new(Arc::new(SimpleLocalizationProvider::en_us()));
//! let registry = DataTypeRegistry::with_types(context, [("Amount".to_string(), amount)])?;
//!
//! let amount = registry.get("Amount")?;
//! assert!(amount.validate(Some(&Value::from(-1.0)))?.is_some());
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod definition;
pub mod error;
pub mod factory;
pub mod locale;
pub mod localization;
pub mod message;
pub mod prototype;
pub mod registry;
pub mod test_support;
pub mod types;
pub mod validation;
pub mod validators;
pub mod value;

pub use context::{DataTypeContext, TypeInitializer};
pub use definition::{ConstraintParams, FormatSpec, NumberFormatOptions, TypeDefinition};
pub use error::{DataTypeError, Result};
pub use factory::{
    custom_type, custom_type_from, date_time_type, date_time_type_from, number_type,
    number_type_from, text_type, text_type_from,
};
pub use locale::Locale;
pub use localization::{
    DateTimeLocalization, LocalizationProvider, NumberLocalization, Translator,
};
pub use message::{LocalizedMessage, MessageSpec};
pub use prototype::Prototype;
pub use registry::DataTypeRegistry;
pub use types::{DataType, ParseResult, TypeConstructor};
pub use validation::{
    compose_validators, validator_factory, ComposedValidator, ValidationErrors, Validator,
    ValidatorFactory, Violation, ViolationParams,
};
pub use value::{Value, DATE_KIND, NUMBER_KIND, TEXT_KIND};
