//! Amount and date formatting shared by both backends.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use mailtpl_config::{FormatConfig, NumberPattern};

use crate::error::ParseAmountError;

/// Exact decimal amount: `unscaled × 10^-scale`.
///
/// ```
/// use mailtpl_renderer::Amount;
///
/// let price = Amount::new(1333, 2);
/// assert_eq!(price.to_string(), "13.33");
/// assert_eq!("13.33".parse::<Amount>().unwrap(), price);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Amount {
    unscaled: i64,
    scale: u32,
}

impl Amount {
    /// Largest supported scale.
    pub const MAX_SCALE: u32 = 18;

    /// `unscaled × 10^-scale`.
    ///
    /// # Panics
    ///
    /// Panics if `scale` exceeds [`Amount::MAX_SCALE`].
    #[must_use]
    pub const fn new(unscaled: i64, scale: u32) -> Self {
        match Self::checked_new(unscaled, scale) {
            Some(amount) => amount,
            None => panic!("amount scale exceeds Amount::MAX_SCALE"),
        }
    }

    /// Like [`Amount::new`], returning `None` if `scale` exceeds
    /// [`Amount::MAX_SCALE`].
    #[must_use]
    pub const fn checked_new(unscaled: i64, scale: u32) -> Option<Self> {
        if scale > Self::MAX_SCALE {
            return None;
        }
        Some(Self { unscaled, scale })
    }

    #[must_use]
    pub const fn unscaled(self) -> i64 {
        self.unscaled
    }

    /// Number of fraction digits.
    #[must_use]
    pub const fn scale(self) -> u32 {
        self.scale
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.unscaled < 0
    }

    /// Digits of the absolute value, left-padded so there is at least one
    /// integer digit.
    fn padded_digits(self) -> String {
        let digits = self.unscaled.unsigned_abs().to_string();
        let min_len = self.scale as usize + 1;
        if digits.len() < min_len {
            format!("{}{digits}", "0".repeat(min_len - digits.len()))
        } else {
            digits
        }
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::new(value, 0)
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (integer.is_empty() && fraction.is_empty())
            || !all_digits(integer)
            || !all_digits(fraction)
        {
            return Err(ParseAmountError::Invalid(s.to_owned()));
        }

        let scale = u32::try_from(fraction.len())
            .ok()
            .filter(|scale| *scale <= Self::MAX_SCALE)
            .ok_or_else(|| ParseAmountError::OutOfRange(s.to_owned()))?;
        let unscaled: i64 = format!("{integer}{fraction}")
            .parse()
            .map_err(|_| ParseAmountError::OutOfRange(s.to_owned()))?;

        Ok(Self::new(if negative { -unscaled } else { unscaled }, scale))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        let digits = self.padded_digits();
        let (integer, fraction) = digits.split_at(digits.len() - self.scale as usize);
        f.write_str(integer)?;
        if !fraction.is_empty() {
            write!(f, ".{fraction}")?;
        }
        Ok(())
    }
}

/// Format an amount with a decimal pattern and the configured separators.
///
/// Follows `DecimalFormat` semantics: rounds half-even to the pattern's
/// maximum fraction digits, drops trailing zeros down to the minimum
/// fraction digits, pads the integer part to the minimum integer digits and
/// puts the minus sign before the prefix.
///
/// ```
/// use mailtpl_config::{FormatConfig, NumberPattern};
/// use mailtpl_renderer::{Amount, format_amount};
///
/// let pattern = NumberPattern::parse("#.## '€'").unwrap();
/// let formatted = format_amount(Amount::new(103, 1), &pattern, &FormatConfig::default());
/// assert_eq!(formatted, "10.3 €");
/// ```
#[must_use]
pub fn format_amount(amount: Amount, pattern: &NumberPattern, format: &FormatConfig) -> String {
    let max_fraction = pattern.max_fraction_digits();
    let min_fraction = pattern.min_fraction_digits();

    let mut digits = u128::from(amount.unscaled.unsigned_abs());
    let mut scale = amount.scale as usize;

    if scale > max_fraction {
        let dropped = u32::try_from(scale - max_fraction).unwrap_or(u32::MAX);
        digits = match 10u128.checked_pow(dropped) {
            Some(divisor) => round_half_even(digits, divisor),
            None => 0,
        };
        scale = max_fraction;
    }
    while scale > min_fraction && digits % 10 == 0 {
        digits /= 10;
        scale -= 1;
    }

    let rounded = digits.to_string();
    let padded = if rounded.len() <= scale {
        format!("{}{rounded}", "0".repeat(scale + 1 - rounded.len()))
    } else {
        rounded
    };
    let (integer, fraction) = padded.split_at(padded.len() - scale);

    let mut integer = integer.trim_start_matches('0').to_owned();
    if integer.len() < pattern.min_integer_digits() {
        integer.insert_str(0, &"0".repeat(pattern.min_integer_digits() - integer.len()));
    }
    let mut fraction = fraction.to_owned();
    if fraction.len() < min_fraction {
        fraction.push_str(&"0".repeat(min_fraction - fraction.len()));
    }
    if integer.is_empty() && fraction.is_empty() {
        integer.push('0');
    }

    let mut out = String::with_capacity(pattern.prefix().len() + integer.len() + 8);
    if amount.is_negative() && digits != 0 {
        out.push('-');
    }
    out.push_str(pattern.prefix());
    match pattern.grouping_size() {
        Some(size) => push_grouped(&mut out, &integer, size, format.grouping_separator()),
        None => out.push_str(&integer),
    }
    if !fraction.is_empty() {
        out.push(format.decimal_separator());
        out.push_str(&fraction);
    }
    out.push_str(pattern.suffix());
    out
}

fn round_half_even(value: u128, divisor: u128) -> u128 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    let twice = remainder * 2;
    if twice > divisor || (twice == divisor && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

fn push_grouped(out: &mut String, integer: &str, size: usize, separator: char) {
    let len = integer.len();
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            out.push(separator);
        }
        out.push(c);
    }
}

/// Format a calendar date with the configured date pattern.
#[must_use]
pub fn format_date(date: NaiveDate, format: &FormatConfig) -> String {
    date.format(format.date_pattern().as_str()).to_string()
}
