//! Locale identifiers
//!
//! A [`Locale`] is an opaque identifier with a canonical string form. The
//! engine uses it only as a cache key and as input to the localization
//! provider; it carries no formatting rules of its own.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DataTypeError, Result};

static LOCALE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z]+)(?:-([a-zA-Z]+))?$").unwrap());
static LOCALE_STANDARD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z]+)(?:_([a-zA-Z]+))?$").unwrap());

/// A locale identifier: lowercase language plus optional uppercase country
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locale {
    language: String,
    country: Option<String>,
}

impl Locale {
    /// Create a locale from language and optional country parts
    pub fn new(language: &str, country: Option<&str>) -> Self {
        Self {
            language: language.to_lowercase(),
            country: country.map(|c| c.to_uppercase()),
        }
    }

    /// Parse a locale code in hyphen form (`en` or `en-US`)
    pub fn parse(code: &str) -> Result<Self> {
        let captures = LOCALE_RE
            .captures(code)
            .ok_or_else(|| DataTypeError::InvalidLocale(code.to_string()))?;
        Ok(Self::new(
            &captures[1],
            captures.get(2).map(|c| c.as_str()),
        ))
    }

    /// Parse a locale code in standard underscore form (`en` or `en_US`)
    pub fn from_standard(code: &str) -> Result<Self> {
        let captures = LOCALE_STANDARD_RE
            .captures(code)
            .ok_or_else(|| DataTypeError::InvalidLocale(code.to_string()))?;
        Ok(Self::new(
            &captures[1],
            captures.get(2).map(|c| c.as_str()),
        ))
    }

    /// The language part (always lowercase)
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The country part, if any (always uppercase)
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Canonical code in hyphen form (`en-US`)
    pub fn code(&self) -> String {
        match &self.country {
            Some(country) => format!("{}-{}", self.language, country),
            None => self.language.clone(),
        }
    }

    /// Standard code in underscore form (`en_US`), used as a cache key
    pub fn standard_code(&self) -> String {
        match &self.country {
            Some(country) => format!("{}_{}", self.language, country),
            None => self.language.clone(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
