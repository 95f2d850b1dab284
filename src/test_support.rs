//! Reference localization provider
//!
//! A deliberately small [`LocalizationProvider`] used by the crate's own
//! tests and usable as a starting point for consumers. Number syntax is
//! driven by per-locale separator rules; date patterns use `M/d/yyyy`-style
//! tokens translated to `chrono` format strings. Production systems are
//! expected to plug in a full localization backend instead.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

use crate::definition::NumberFormatOptions;
use crate::error::{DataTypeError, Result};
use crate::locale::Locale;
use crate::localization::{
    DateTimeLocalization, LocalizationProvider, NumberLocalization, Translator,
    DATE_FORMAT_ERROR, NUMBER_FORMAT_ERROR,
};
use crate::message::LocalizedMessage;
use crate::validation::{ValidationErrors, Violation, ViolationParams};

/// Per-locale numeric separator rules
#[derive(Debug, Clone)]
pub struct NumberFormatRules {
    pub grouping: bool,
    pub group_separator: String,
    pub decimal_separator: String,
}

impl NumberFormatRules {
    /// `1,234,567.89` style
    pub fn en_style() -> Self {
        Self {
            grouping: true,
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }

    /// `1.234.567,89` style
    pub fn de_style() -> Self {
        Self {
            grouping: true,
            group_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
        }
    }
}

fn format_error(key: &str, raw: &str) -> ValidationErrors {
    let mut params = ViolationParams::new();
    params.insert("value".to_string(), json!(raw));
    ValidationErrors::from([(key.to_string(), Violation::new(params))])
}

/// Number localization over separator rules
pub struct SimpleNumberLocalization {
    rules: NumberFormatRules,
    syntax: Regex,
}

impl SimpleNumberLocalization {
    pub fn new(rules: NumberFormatRules) -> Self {
        let group = regex::escape(&rules.group_separator);
        let decimal = regex::escape(&rules.decimal_separator);
        let integral = if rules.grouping {
            format!("[0-9{group}]+")
        } else {
            "[0-9]+".to_string()
        };
        let fractional = format!("{decimal}[0-9]*");
        let pattern = format!(r"^\s*[+-]?\s*(?:{integral}(?:{fractional})?|{fractional})\s*$");
        Self {
            rules,
            syntax: Regex::new(&pattern).expect("separator rules compile to a valid pattern"),
        }
    }
}

impl NumberLocalization for SimpleNumberLocalization {
    fn group_separator(&self) -> &str {
        &self.rules.group_separator
    }

    fn decimal_separator(&self) -> &str {
        &self.rules.decimal_separator
    }

    fn grouping(&self) -> bool {
        self.rules.grouping
    }

    fn parse(&self, raw: &str) -> Result<f64> {
        if !self.syntax.is_match(raw) {
            return Err(DataTypeError::Localization(format!(
                "value '{raw}' cannot be converted to a number"
            )));
        }

        let mut normalized = raw.replace(char::is_whitespace, "");
        if self.rules.grouping {
            normalized = normalized.replace(&self.rules.group_separator, "");
        }
        if self.rules.decimal_separator != "." {
            normalized = normalized.replace(&self.rules.decimal_separator, ".");
        }
        if normalized.starts_with('.') {
            normalized.insert(0, '0');
        }
        if normalized.ends_with('.') {
            normalized.push('0');
        }

        normalized.parse::<f64>().map_err(|_| {
            DataTypeError::Localization(format!("value '{raw}' cannot be converted to a number"))
        })
    }

    fn validate_format(&self, raw: &str) -> Option<ValidationErrors> {
        if self.syntax.is_match(raw) {
            None
        } else {
            Some(format_error(NUMBER_FORMAT_ERROR, raw))
        }
    }

    fn format(&self, value: f64, options: &NumberFormatOptions) -> String {
        let min_digits = options.minimum_fraction_digits.unwrap_or(0) as usize;
        let max_digits = (options.maximum_fraction_digits.unwrap_or(3) as usize).max(min_digits);

        let rounded = format!("{value:.max_digits$}");
        let (integral, fraction) = match rounded.split_once('.') {
            Some((integral, fraction)) => (integral, fraction),
            None => (rounded.as_str(), ""),
        };

        let mut fraction = fraction.trim_end_matches('0').to_string();
        while fraction.len() < min_digits {
            fraction.push('0');
        }

        let (sign, digits) = match integral.strip_prefix('-') {
            Some(digits) => ("-", digits),
            None => ("", integral),
        };
        let grouped = if self.rules.grouping {
            group_digits(digits, &self.rules.group_separator)
        } else {
            digits.to_string()
        };

        if fraction.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{grouped}{}{fraction}", self.rules.decimal_separator)
        }
    }

    fn validate(&self, _value: f64) -> Option<ValidationErrors> {
        None
    }
}

fn group_digits(digits: &str, separator: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in chars.iter().enumerate() {
        if index > 0 && (chars.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(*digit);
    }
    grouped
}

static PATTERN_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("yyyy|yy|MM|M|dd|d|HH|H|mm|m|ss|s").unwrap());

/// Translate an `M/d/yyyy`-style pattern into a `chrono` format string
fn to_chrono_format(pattern: &str) -> String {
    let mut format = String::new();
    let mut last = 0;
    for token in PATTERN_TOKEN_RE.find_iter(pattern) {
        format.push_str(&pattern[last..token.start()].replace('%', "%%"));
        format.push_str(match token.as_str() {
            "yyyy" => "%Y",
            "yy" => "%y",
            "MM" => "%m",
            "M" => "%-m",
            "dd" => "%d",
            "d" => "%-d",
            "HH" => "%H",
            "H" => "%-H",
            "mm" => "%M",
            "m" => "%-M",
            "ss" => "%S",
            "s" => "%-S",
            _ => unreachable!(),
        });
        last = token.end();
    }
    format.push_str(&pattern[last..].replace('%', "%%"));
    format
}

fn has_time_tokens(pattern: &str) -> bool {
    PATTERN_TOKEN_RE
        .find_iter(pattern)
        .any(|token| matches!(token.as_str(), "HH" | "H" | "mm" | "m" | "ss" | "s"))
}

/// Date localization over pattern translation to `chrono`
pub struct SimpleDateTimeLocalization;

impl SimpleDateTimeLocalization {
    fn try_parse(&self, raw: &str, pattern: &str) -> Option<NaiveDateTime> {
        let format = to_chrono_format(pattern);
        if has_time_tokens(pattern) {
            NaiveDateTime::parse_from_str(raw, &format).ok()
        } else {
            NaiveDate::parse_from_str(raw, &format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        }
    }
}

impl DateTimeLocalization for SimpleDateTimeLocalization {
    fn parse(&self, raw: &str, pattern: &str) -> Result<NaiveDateTime> {
        self.try_parse(raw, pattern).ok_or_else(|| {
            DataTypeError::Localization(format!("value '{raw}' cannot be converted to a date"))
        })
    }

    fn validate_format(&self, raw: &str, pattern: &str) -> Option<ValidationErrors> {
        if self.try_parse(raw, pattern).is_some() {
            None
        } else {
            Some(format_error(DATE_FORMAT_ERROR, raw))
        }
    }

    fn format(&self, value: &NaiveDateTime, pattern: &str) -> String {
        value.format(&to_chrono_format(pattern)).to_string()
    }

    fn validate(&self, _value: &NaiveDateTime) -> Option<ValidationErrors> {
        // chrono values are real calendar dates by construction
        None
    }
}

/// Translator that keeps message keys as the rendered text
pub struct KeyTranslator;

impl Translator for KeyTranslator {
    fn translate(&self, message: &LocalizedMessage) -> String {
        message.key.clone()
    }
}

/// A configurable in-process localization provider
pub struct SimpleLocalizationProvider {
    current: Mutex<Locale>,
    rules: HashMap<String, NumberFormatRules>,
    translator: Arc<KeyTranslator>,
}

impl SimpleLocalizationProvider {
    pub fn new(current: Locale) -> Self {
        Self {
            current: Mutex::new(current),
            rules: HashMap::new(),
            translator: Arc::new(KeyTranslator),
        }
    }

    /// `en-US` provider with en-style numbers everywhere
    pub fn en_us() -> Self {
        Self::new(Locale::new("en", Some("US")))
    }

    /// Attach separator rules for a locale; locales without explicit rules
    /// fall back to en-style
    pub fn with_rules(mut self, locale: &Locale, rules: NumberFormatRules) -> Self {
        self.rules.insert(locale.standard_code(), rules);
        self
    }

    /// Change the ambient current locale (e.g. to exercise per-locale caches)
    pub fn set_current_locale(&self, locale: Locale) {
        *self.current.lock().expect("locale lock") = locale;
    }
}

impl LocalizationProvider for SimpleLocalizationProvider {
    fn current_locale(&self) -> Locale {
        self.current.lock().expect("locale lock").clone()
    }

    fn translator(&self) -> Arc<dyn Translator> {
        self.translator.clone()
    }

    fn number_localization(&self, locale: &Locale) -> Arc<dyn NumberLocalization> {
        let rules = self
            .rules
            .get(&locale.standard_code())
            .cloned()
            .unwrap_or_else(NumberFormatRules::en_style);
        Arc::new(SimpleNumberLocalization::new(rules))
    }

    fn date_time_localization(&self, _locale: &Locale) -> Arc<dyn DateTimeLocalization> {
        Arc::new(SimpleDateTimeLocalization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_style_number_round_trip() {
        let localization = SimpleNumberLocalization::new(NumberFormatRules::en_style());
        let formatted = localization.format(123456.789, &NumberFormatOptions::default());
        assert_eq!(formatted, "123,456.789");
        assert_eq!(localization.parse(&formatted).unwrap(), 123456.789);
    }

    #[test]
    fn de_style_number_round_trip() {
        let localization = SimpleNumberLocalization::new(NumberFormatRules::de_style());
        let formatted = localization.format(123456.789, &NumberFormatOptions::default());
        assert_eq!(formatted, "123.456,789");
        assert_eq!(localization.parse(&formatted).unwrap(), 123456.789);
    }

    #[test]
    fn minimum_fraction_digits_pad_zeroes() {
        let localization = SimpleNumberLocalization::new(NumberFormatRules::en_style());
        let options = NumberFormatOptions::min_fraction_digits(2);
        assert_eq!(localization.format(1.0, &options), "1.00");
    }

    #[test]
    fn maximum_fraction_digits_round() {
        let localization = SimpleNumberLocalization::new(NumberFormatRules::en_style());
        let options = NumberFormatOptions::max_fraction_digits(1);
        assert_eq!(localization.format(1.25, &options), "1.2");
        assert_eq!(localization.format(1.35, &options), "1.4");
    }

    #[test]
    fn number_syntax_is_locale_specific() {
        let localization = SimpleNumberLocalization::new(NumberFormatRules::en_style());
        assert!(localization.validate_format("1,234.5").is_none());
        assert!(localization.validate_format("abc").is_some());
    }

    #[test]
    fn date_pattern_round_trip() {
        let localization = SimpleDateTimeLocalization;
        let date = NaiveDate::from_ymd_opt(2019, 4, 25)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let formatted = localization.format(&date, "M/d/yyyy");
        assert_eq!(formatted, "4/25/2019");
        assert_eq!(localization.parse(&formatted, "M/d/yyyy").unwrap(), date);
    }

    #[test]
    fn date_format_mismatch_is_reported() {
        let localization = SimpleDateTimeLocalization;
        assert!(localization.validate_format("2019-04-25", "M/d/yyyy").is_some());
        assert!(localization.validate_format("2/30/2019", "M/d/yyyy").is_some());
    }
}
