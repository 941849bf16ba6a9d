//! Decimal number patterns.
//!
//! Supports the commonly used subset of `java.text.DecimalFormat` syntax:
//!
//! - `0` required digit, `#` optional digit
//! - `,` grouping separator (group size is the digit count after the last `,`)
//! - `.` decimal separator
//! - `'...'` quoted literal, `''` a single quote
//!
//! Anything before the first digit placeholder is the prefix, anything after
//! the last one is the suffix: `#.## '€'` formats `13.33` as `13.33 €`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Parsed decimal number pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NumberPattern {
    source: String,
    prefix: String,
    suffix: String,
    min_integer_digits: usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
    grouping_size: Option<usize>,
}

impl NumberPattern {
    /// Parse a pattern such as `#,##0.00` or `#.## '€'`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when the pattern has no digit
    /// placeholder, a misplaced separator or an unterminated quote.
    pub fn parse(pattern: &str) -> Result<Self, ConfigError> {
        let invalid =
            |reason: &str| ConfigError::invalid("number pattern", format!("`{pattern}` {reason}"));

        let mut prefix = String::new();
        let mut number = String::new();
        let mut suffix = String::new();
        let mut section = Section::Prefix;
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if section == Section::Number {
                    section = Section::Suffix;
                }
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    section.push_literal('\'', &mut prefix, &mut suffix);
                    continue;
                }
                let mut closed = false;
                while let Some(q) = chars.next() {
                    if q == '\'' {
                        if chars.peek() == Some(&'\'') {
                            chars.next();
                            section.push_literal('\'', &mut prefix, &mut suffix);
                            continue;
                        }
                        closed = true;
                        break;
                    }
                    section.push_literal(q, &mut prefix, &mut suffix);
                }
                if !closed {
                    return Err(invalid("has an unterminated quote"));
                }
                continue;
            }

            if c == ';' {
                return Err(invalid("uses a negative subpattern, which is not supported"));
            }
            let is_number_char = matches!(c, '#' | '0' | ',' | '.');
            match (section, is_number_char) {
                (Section::Prefix | Section::Number, true) => {
                    section = Section::Number;
                    number.push(c);
                }
                (Section::Suffix, true) => {
                    return Err(invalid("has digit placeholders after the suffix"));
                }
                (Section::Number, false) => {
                    section = Section::Suffix;
                    suffix.push(c);
                }
                (Section::Prefix | Section::Suffix, false) => {
                    section.push_literal(c, &mut prefix, &mut suffix);
                }
            }
        }

        if !number.contains(['#', '0']) {
            return Err(invalid("has no digit placeholder"));
        }

        let (integer, fraction) = match number.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (number.as_str(), ""),
        };
        if fraction.contains(['.', ',']) {
            return Err(invalid("has a separator inside the fraction part"));
        }
        if fraction.trim_start_matches('0').contains('0') {
            return Err(invalid("has a required fraction digit after an optional one"));
        }

        let grouping_size = match integer.rfind(',') {
            Some(pos) => {
                let size = integer[pos + 1..].len();
                if size == 0 {
                    return Err(invalid("has an empty grouping"));
                }
                Some(size)
            }
            None => None,
        };

        Ok(Self {
            source: pattern.to_owned(),
            prefix,
            suffix,
            min_integer_digits: integer.matches('0').count(),
            min_fraction_digits: fraction.matches('0').count(),
            max_fraction_digits: fraction.len(),
            grouping_size,
        })
    }

    /// `#,##0.00`, the default amount pattern.
    pub(crate) fn grouped_two_decimals() -> Self {
        Self {
            source: "#,##0.00".to_owned(),
            prefix: String::new(),
            suffix: String::new(),
            min_integer_digits: 1,
            min_fraction_digits: 2,
            max_fraction_digits: 2,
            grouping_size: Some(3),
        }
    }

    /// The pattern string as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Literal text placed before the number.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Literal text placed after the number.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    #[must_use]
    pub fn min_integer_digits(&self) -> usize {
        self.min_integer_digits
    }

    #[must_use]
    pub fn min_fraction_digits(&self) -> usize {
        self.min_fraction_digits
    }

    #[must_use]
    pub fn max_fraction_digits(&self) -> usize {
        self.max_fraction_digits
    }

    /// Digits per group, if the pattern groups the integer part.
    #[must_use]
    pub fn grouping_size(&self) -> Option<usize> {
        self.grouping_size
    }
}

/// Part of the pattern the parser is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Prefix,
    Number,
    Suffix,
}

impl Section {
    fn push_literal(self, c: char, prefix: &mut String, suffix: &mut String) {
        match self {
            Self::Prefix => prefix.push(c),
            Self::Number | Self::Suffix => suffix.push(c),
        }
    }
}

impl TryFrom<String> for NumberPattern {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NumberPattern> for String {
    fn from(pattern: NumberPattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for NumberPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_grouped_pattern() {
        let pattern = NumberPattern::parse("#,##0.00").unwrap();
        assert_eq!(pattern.prefix(), "");
        assert_eq!(pattern.suffix(), "");
        assert_eq!(pattern.min_integer_digits(), 1);
        assert_eq!(pattern.min_fraction_digits(), 2);
        assert_eq!(pattern.max_fraction_digits(), 2);
        assert_eq!(pattern.grouping_size(), Some(3));
    }

    #[test]
    fn test_default_pattern_matches_parsed() {
        assert_eq!(
            NumberPattern::grouped_two_decimals(),
            NumberPattern::parse("#,##0.00").unwrap()
        );
    }

    #[test]
    fn test_parse_quoted_currency_suffix() {
        let pattern = NumberPattern::parse("#.## '€'").unwrap();
        assert_eq!(pattern.suffix(), " €");
        assert_eq!(pattern.min_integer_digits(), 0);
        assert_eq!(pattern.min_fraction_digits(), 0);
        assert_eq!(pattern.max_fraction_digits(), 2);
        assert_eq!(pattern.grouping_size(), None);
    }

    #[test]
    fn test_parse_prefix() {
        let pattern = NumberPattern::parse("$ #,##0.00").unwrap();
        assert_eq!(pattern.prefix(), "$ ");
        assert_eq!(pattern.suffix(), "");
    }

    #[test]
    fn test_parse_escaped_quote() {
        let pattern = NumberPattern::parse("0 'o''clock'").unwrap();
        assert_eq!(pattern.suffix(), " o'clock");

        let pattern = NumberPattern::parse("0''").unwrap();
        assert_eq!(pattern.suffix(), "'");
    }

    #[test]
    fn test_parse_sections_in_order() {
        let pattern = NumberPattern::parse("'EUR' #,##0.00'*' net").unwrap();
        assert_eq!(pattern.prefix(), "EUR ");
        assert_eq!(pattern.suffix(), "* net");
        assert_eq!(pattern.grouping_size(), Some(3));

        assert!(NumberPattern::parse("0 EUR 0").is_err());
        assert!(NumberPattern::parse("0'x'0").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_digits() {
        assert!(NumberPattern::parse("EUR").is_err());
        assert!(NumberPattern::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_unterminated_quote() {
        assert!(NumberPattern::parse("#.## '€").is_err());
    }

    #[test]
    fn test_parse_rejects_negative_subpattern() {
        assert!(NumberPattern::parse("#.##;(#.##)").is_err());
    }

    #[test]
    fn test_parse_rejects_grouping_in_fraction() {
        assert!(NumberPattern::parse("#.#,#").is_err());
    }

    #[test]
    fn test_parse_rejects_optional_before_required_fraction() {
        assert!(NumberPattern::parse("0.#0").is_err());
    }

    #[test]
    fn test_parse_rejects_trailing_grouping() {
        assert!(NumberPattern::parse("#,.00").is_err());
    }

    #[test]
    fn test_display_returns_source() {
        let pattern = NumberPattern::parse("#.## '€'").unwrap();
        assert_eq!(pattern.to_string(), "#.## '€'");
    }
}
