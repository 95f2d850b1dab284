//! Type factories
//!
//! Uniform constructors for prototypes of every built-in kind and for
//! custom kinds registered with a constructor function. Each kind has a
//! root form (`number_type`) and a derived form (`number_type_from`) that
//! applies definition inheritance against a base prototype.

use std::sync::Arc;

use crate::definition::TypeDefinition;
use crate::prototype::Prototype;
use crate::types::{DateTimeType, NumberType, TextType, TypeConstructor};
use crate::value::{DATE_KIND, NUMBER_KIND, TEXT_KIND};

/// Root prototype for the number kind
pub fn number_type(definition: TypeDefinition) -> Arc<Prototype> {
    custom_type(NUMBER_KIND, NumberType::construct, definition)
}

/// Number prototype specialized from a base prototype
pub fn number_type_from(base: &Prototype, definition: TypeDefinition) -> Arc<Prototype> {
    custom_type_from(NUMBER_KIND, NumberType::construct, base, definition)
}

/// Root prototype for the text kind
pub fn text_type(definition: TypeDefinition) -> Arc<Prototype> {
    custom_type(TEXT_KIND, TextType::construct, definition)
}

/// Text prototype specialized from a base prototype
pub fn text_type_from(base: &Prototype, definition: TypeDefinition) -> Arc<Prototype> {
    custom_type_from(TEXT_KIND, TextType::construct, base, definition)
}

/// Root prototype for the date kind. The definition must carry a format
/// pattern; a missing one surfaces as a checked error on first use.
pub fn date_time_type(definition: TypeDefinition) -> Arc<Prototype> {
    custom_type(DATE_KIND, DateTimeType::construct, definition)
}

/// Date prototype specialized from a base prototype
pub fn date_time_type_from(base: &Prototype, definition: TypeDefinition) -> Arc<Prototype> {
    custom_type_from(DATE_KIND, DateTimeType::construct, base, definition)
}

/// Root prototype for a custom kind: a kind tag plus a constructor for the
/// kind's instances
pub fn custom_type(
    kind: &str,
    constructor: TypeConstructor,
    definition: TypeDefinition,
) -> Arc<Prototype> {
    Arc::new(Prototype::new(kind, constructor, definition))
}

/// Custom-kind prototype specialized from a base prototype
pub fn custom_type_from(
    kind: &str,
    constructor: TypeConstructor,
    base: &Prototype,
    definition: TypeDefinition,
) -> Arc<Prototype> {
    Arc::new(Prototype::new(
        kind,
        constructor,
        TypeDefinition::inherit(base.definition(), &definition),
    ))
}
