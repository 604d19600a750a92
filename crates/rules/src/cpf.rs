//! CPF (Cadastro de Pessoas Físicas) validation.
//!
//! A CPF is 11 decimal digits; the last two are modulo-11 check digits over
//! the preceding ones. Input may carry the usual `000.000.000-00` mask, which
//! is stripped before validation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ResultRules, RulesError, mask};

/// Number of digits in an unmasked CPF.
pub const CPF_LEN: usize = 11;

/// Returns `true` when `input` is a well-formed CPF with valid check digits.
///
/// Non-digit characters are ignored, so masked and raw input behave the same.
/// Sequences of a single repeated digit (`111.111.111-11`) satisfy the check
/// digit arithmetic but are never issued, so they are rejected.
///
/// ```rust
/// assert!(rules::cpf::validate("529.982.247-25"));
/// assert!(!rules::cpf::validate("11111111111"));
/// assert!(!rules::cpf::validate("123"));
/// ```
#[must_use]
pub fn validate(input: &str) -> bool {
    let digits: Vec<u32> = input.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != CPF_LEN {
        return false;
    }
    if digits.iter().all(|d| *d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Computes the check digit for a 9 or 10 digit prefix.
///
/// Weights start at `prefix.len() + 1` and decrease to 2.
fn check_digit(prefix: &[u32]) -> u32 {
    let top = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let digit = 11 - sum % 11;
    if digit >= 10 { 0 } else { digit }
}

/// A validated CPF holding its 11 raw digits.
///
/// `Display` renders the masked form; serialization uses the raw digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Parses masked or raw input into a `Cpf`.
    pub fn parse(input: &str) -> ResultRules<Self> {
        if !validate(input) {
            return Err(RulesError::InvalidCpf(mask::cpf(input)));
        }
        Ok(Self(mask::unmask(input)))
    }

    /// Raw digits, as sent to the server.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form, e.g. `529.982.247-25`.
    #[must_use]
    pub fn masked(&self) -> String {
        mask::cpf(&self.0)
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl FromStr for Cpf {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpf {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cpf> for String {
    fn from(value: Cpf) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_valid_cpfs() {
        for cpf in ["52998224725", "529.982.247-25", "11144477735", "111.444.777-35"] {
            assert!(validate(cpf), "{cpf} should be valid");
        }
    }

    #[test]
    fn repeated_digits_are_rejected() {
        for d in 0..=9 {
            let cpf = d.to_string().repeat(CPF_LEN);
            assert!(!validate(&cpf), "{cpf} should be rejected");
        }
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert!(!validate(""));
        assert!(!validate("123"));
        assert!(!validate("5299822472"));
        assert!(!validate("529982247250"));
    }

    #[test]
    fn wrong_check_digits_are_rejected() {
        assert!(!validate("52998224724"));
        assert!(!validate("52998224735"));
        assert!(!validate("52998224716"));
    }

    #[test]
    fn non_digit_input_is_not_an_error() {
        assert!(!validate("abcdefghijk"));
        assert!(!validate("529.982.247-2x"));
    }

    #[test]
    fn check_digit_maps_ten_and_eleven_to_zero() {
        // 9 zeros sum to 0 -> 11 - 0 = 11 -> 0.
        assert_eq!(check_digit(&[0; 9]), 0);
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), 2);
        assert_eq!(check_digit(&[5, 2, 9, 9, 8, 2, 2, 4, 7, 2]), 5);
    }

    #[test]
    fn parsed_cpf_keeps_raw_digits() {
        let cpf: Cpf = "529.982.247-25".parse().unwrap();
        assert_eq!(cpf.as_str(), "52998224725");
        assert_eq!(cpf.to_string(), "529.982.247-25");
    }

    #[test]
    fn parse_reports_masked_input() {
        let err = Cpf::parse("52998224724").unwrap_err();
        assert_eq!(err, RulesError::InvalidCpf("529.982.247-24".to_string()));
    }

    #[test]
    fn serializes_as_raw_digits() {
        let cpf = Cpf::parse("529.982.247-25").unwrap();
        assert_eq!(serde_json::to_string(&cpf).unwrap(), "\"52998224725\"");
        let back: Cpf = serde_json::from_str("\"52998224725\"").unwrap();
        assert_eq!(back, cpf);
        assert!(serde_json::from_str::<Cpf>("\"11111111111\"").is_err());
    }
}
