//! Validated configuration values.

use std::fmt::{self, Write};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// CSS hex color (`#RGB` or `#RRGGBB`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(String);

impl Color {
    /// Parse a hex color.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` unless the value is `#` followed by
    /// three or six hex digits.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let valid = value.strip_prefix('#').is_some_and(|hex| {
            matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        });
        if valid {
            Ok(Self(value.to_owned()))
        } else {
            Err(ConfigError::invalid(
                "color",
                format!("`{value}` is not a #RGB or #RRGGBB hex value"),
            ))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Color from a compile-time constant known to be valid.
    pub(crate) fn constant(value: &'static str) -> Self {
        debug_assert!(Self::parse(value).is_ok(), "invalid color constant {value}");
        Self(value.to_owned())
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semantic button color token, resolved against the button palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonColor {
    #[default]
    Blue,
    Green,
    Red,
    Gray,
}

impl ButtonColor {
    /// Lowercase token name, used as CSS class suffix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Gray => "gray",
        }
    }
}

/// strftime-style date pattern (chrono syntax) that formats a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct DatePattern(String);

impl DatePattern {
    /// Parse and validate a date pattern.
    ///
    /// The pattern is rejected if it contains unknown specifiers or fields a
    /// plain date cannot provide (time of day, offsets).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for empty or unusable patterns.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        if value.is_empty() {
            return Err(ConfigError::invalid("date pattern", "cannot be empty"));
        }
        let sample = NaiveDate::from_ymd_opt(2000, 1, 31).unwrap_or_default();
        let mut sink = String::new();
        if write!(sink, "{}", sample.format(value)).is_err() {
            return Err(ConfigError::invalid(
                "date pattern",
                format!("`{value}` cannot format a calendar date"),
            ));
        }
        Ok(Self(value.to_owned()))
    }

    /// `%Y-%m-%d`, the default date pattern.
    pub(crate) fn iso() -> Self {
        Self("%Y-%m-%d".to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DatePattern {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_accepts_short_and_long_hex() {
        assert_eq!(Color::parse("#fff").unwrap().as_str(), "#fff");
        assert_eq!(Color::parse("#3869D4").unwrap().as_str(), "#3869D4");
    }

    #[test]
    fn test_color_rejects_invalid_values() {
        assert!(Color::parse("3869D4").is_err());
        assert!(Color::parse("#3869D").is_err());
        assert!(Color::parse("#GGGGGG").is_err());
        assert!(Color::parse("red").is_err());
        assert!(Color::parse("#fff;background:url(x)").is_err());
    }

    #[test]
    fn test_button_color_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: ButtonColor,
        }
        let wrapper: Wrapper = toml::from_str(r#"color = "green""#).unwrap();
        assert_eq!(wrapper.color, ButtonColor::Green);
        assert_eq!(wrapper.color.as_str(), "green");
    }

    #[test]
    fn test_date_pattern_accepts_date_fields() {
        assert!(DatePattern::parse("%d.%m.%Y").is_ok());
        assert!(DatePattern::parse("%B %e, %Y").is_ok());
    }

    #[test]
    fn test_default_date_pattern_is_valid() {
        assert_eq!(DatePattern::iso(), DatePattern::parse("%Y-%m-%d").unwrap());
    }

    #[test]
    fn test_date_pattern_rejects_time_fields() {
        assert!(DatePattern::parse("%H:%M").is_err());
    }

    #[test]
    fn test_date_pattern_rejects_empty() {
        assert!(DatePattern::parse("").is_err());
    }

    #[test]
    fn test_date_pattern_rejects_unknown_specifier() {
        assert!(DatePattern::parse("%Q").is_err());
    }
}
