use std::fmt;

use crate::{Currency, RulesError};

/// Signed money amount represented as integer **minor units** (centavos).
///
/// Use this type for every monetary value in the rule set (fees, withdrawal
/// amounts) to avoid floating-point drift.
///
/// # Examples
///
/// ```rust
/// use rules::{Currency, Money};
///
/// let fee = Money::new(3_67);
/// assert_eq!(fee.minor(), 367);
/// assert_eq!(fee.format(Currency::Brl), "R$ 3,67");
/// ```
///
/// Parsing from user input (accepts `,` or `.` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use rules::{Currency, Money};
///
/// assert_eq!(Money::parse_major("10", Currency::Brl).unwrap().minor(), 1000);
/// assert_eq!(Money::parse_major("10,5", Currency::Brl).unwrap().minor(), 1050);
/// assert!(Money::parse_major("12,345", Currency::Brl).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Formats the amount without the currency symbol, e.g. `1.000,50`.
    #[must_use]
    pub fn format_plain(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        format!("{sign}{}", format_minor_digits(&digits, currency))
    }

    /// Formats the amount for display, e.g. `R$ 1.000,50` or `-R$ 3,67`.
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        format!(
            "{sign}{} {}",
            currency.symbol(),
            format_minor_digits(&digits, currency)
        )
    }

    /// Parses a decimal string in major units into minor units.
    ///
    /// Accepts `,` or `.` as decimal separator, an optional leading `+`/`-`
    /// and `.` thousands separators when a `,` decimal separator is present
    /// (`1.234,56`).
    ///
    /// Validation rules:
    /// - max `currency.minor_units()` fractional digits
    /// - rejects empty/invalid strings
    pub fn parse_major(input: &str, currency: Currency) -> Result<Self, RulesError> {
        let invalid = || RulesError::InvalidAmount(format!("invalid amount: {input}"));
        let overflow = || RulesError::InvalidAmount("amount too large".to_string());

        let trimmed = input.trim();
        let trimmed = trimmed
            .strip_prefix(currency.symbol())
            .map(str::trim)
            .unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(RulesError::InvalidAmount("empty amount".to_string()));
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim())
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped.trim())
        } else {
            (false, trimmed)
        };

        // With a comma present, dots can only be thousands separators.
        let normalized = if rest.contains(currency.decimal_separator()) {
            rest.replace(currency.thousands_separator(), "")
                .replace(currency.decimal_separator(), ".")
        } else {
            rest.to_string()
        };

        let mut parts = normalized.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }
        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| overflow())?;
        let scale = 10_i64.pow(u32::from(currency.minor_units()));

        let minor: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if frac.len() > usize::from(currency.minor_units()) {
                    return Err(RulesError::InvalidAmount("too many decimals".to_string()));
                }
                let padding = u32::from(currency.minor_units()) - frac.len() as u32;
                frac.parse::<i64>().map_err(|_| invalid())? * 10_i64.pow(padding)
            }
        };

        let total = major
            .checked_mul(scale)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Money(if negative { -total } else { total }))
    }
}

/// Formats an unsigned string of minor-unit digits as `1.234,56`.
///
/// Leading zeros are collapsed and the fraction is always padded to
/// `currency.minor_units()` digits. Works on strings so arbitrarily long
/// keystroke input never overflows.
pub(crate) fn format_minor_digits(digits: &str, currency: Currency) -> String {
    let minor_units = usize::from(currency.minor_units());
    let significant = digits.trim_start_matches('0');
    let padded = format!("{significant:0>width$}", width = minor_units + 1);
    let (integer, fraction) = padded.split_at(padded.len() - minor_units);

    let mut out = String::with_capacity(padded.len() + padded.len() / 3 + 1);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            out.push(currency.thousands_separator());
        }
        out.push(ch);
    }
    out.push(currency.decimal_separator());
    out.push_str(fraction);
    out
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Currency::Brl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_brl() {
        assert_eq!(Money::new(0).format(Currency::Brl), "R$ 0,00");
        assert_eq!(Money::new(1).format(Currency::Brl), "R$ 0,01");
        assert_eq!(Money::new(367).format(Currency::Brl), "R$ 3,67");
        assert_eq!(Money::new(100_050).format(Currency::Brl), "R$ 1.000,50");
        assert_eq!(Money::new(-367).format(Currency::Brl), "-R$ 3,67");
        assert_eq!(
            Money::new(123_456_789).format(Currency::Brl),
            "R$ 1.234.567,89"
        );
    }

    #[test]
    fn format_plain_has_no_symbol() {
        assert_eq!(Money::new(100_050).format_plain(Currency::Brl), "1.000,50");
        assert_eq!(Money::new(-10).format_plain(Currency::Brl), "-0,10");
    }

    #[test]
    fn minor_digits_collapse_leading_zeros() {
        assert_eq!(format_minor_digits("0005", Currency::Brl), "0,05");
        assert_eq!(format_minor_digits("000", Currency::Brl), "0,00");
        assert_eq!(format_minor_digits("100000", Currency::Brl), "1.000,00");
    }

    #[test]
    fn parse_accepts_comma_or_dot() {
        let p = |s: &str| Money::parse_major(s, Currency::Brl).unwrap().minor();
        assert_eq!(p("10"), 1000);
        assert_eq!(p("10.5"), 1050);
        assert_eq!(p("10,50"), 1050);
        assert_eq!(p("-0,01"), -1);
        assert_eq!(p("+1,00"), 100);
        assert_eq!(p("  2,30 "), 230);
        assert_eq!(p("1.234,56"), 123_456);
        assert_eq!(p("R$ 3,67"), 367);
    }

    #[test]
    fn parse_rejects_more_than_two_decimals() {
        assert!(Money::parse_major("12,345", Currency::Brl).is_err());
        assert!(Money::parse_major("0.001", Currency::Brl).is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Money::parse_major("", Currency::Brl).is_err());
        assert!(Money::parse_major("abc", Currency::Brl).is_err());
        assert!(Money::parse_major("1.2.3", Currency::Brl).is_err());
        assert!(Money::parse_major(",50", Currency::Brl).is_err());
    }
}
