//! Incremental input masks.
//!
//! Every mask is a pure function from whatever the user has typed so far to
//! the display string. Non-digit characters are dropped first, so feeding a
//! masked value back in yields the same mask, and over-length input is
//! truncated rather than rejected. [`unmask`] recovers the raw digits.

use serde::{Deserialize, Serialize};

use crate::{Currency, ResultRules, RulesError, cpf::CPF_LEN, money::format_minor_digits};

/// Maximum number of digits kept by [`phone`] (DDD + 9 subscriber digits).
pub const PHONE_MAX_LEN: usize = 11;
/// Maximum number of digits kept by [`agency`].
pub const AGENCY_MAX_LEN: usize = 4;
/// Maximum number of digits kept by [`account_number`], verifier included.
pub const ACCOUNT_MAX_LEN: usize = 12;

/// Strips every non-digit character.
#[must_use]
pub fn unmask(display: &str) -> String {
    display.chars().filter(char::is_ascii_digit).collect()
}

fn digits_up_to(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Masks a CPF as `000.000.000-00`.
///
/// Separators only appear once the digit after them has been typed:
/// `1234` renders as `123.4`.
#[must_use]
pub fn cpf(raw: &str) -> String {
    let digits = digits_up_to(raw, CPF_LEN);
    let mut out = String::with_capacity(CPF_LEN + 3);
    for (idx, ch) in digits.chars().enumerate() {
        match idx {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(ch);
    }
    out
}

/// Masks a phone number as `(00) 00000-0000`, or `(00) 0000-0000` for
/// ten-digit landlines.
///
/// Partial input renders the partial pattern: `(8`, `(85) 9`, `(85) 9999-9`.
#[must_use]
pub fn phone(raw: &str) -> String {
    let digits = digits_up_to(raw, PHONE_MAX_LEN);
    if digits.is_empty() {
        return String::new();
    }

    let (ddd, subscriber) = digits.split_at(digits.len().min(2));
    let mut out = format!("({ddd}");
    if subscriber.is_empty() {
        return out;
    }
    out.push_str(") ");

    // Mobile numbers have 9 subscriber digits and a 5-4 split.
    let head = if subscriber.len() == 9 { 5 } else { 4 };
    if subscriber.len() <= head {
        out.push_str(subscriber);
    } else {
        let (first, last) = subscriber.split_at(head);
        out.push_str(first);
        out.push('-');
        out.push_str(last);
    }
    out
}

/// Returns `true` for a complete Brazilian phone number.
///
/// Accepts 10 digits (landline) or 11 digits (mobile, subscriber starting
/// with `9`), with an area code (DDD) between 11 and 99 that does not end
/// in zero.
#[must_use]
pub fn is_valid_phone(input: &str) -> bool {
    let digits = unmask(input);
    if digits.len() != 10 && digits.len() != PHONE_MAX_LEN {
        return false;
    }
    let ddd: u32 = match digits[..2].parse() {
        Ok(ddd) => ddd,
        Err(_) => return false,
    };
    if !(11..=99).contains(&ddd) || ddd % 10 == 0 {
        return false;
    }
    digits.len() == 10 || digits.as_bytes()[2] == b'9'
}

/// Masks a digit string as an amount of centavos: `100050` → `1.000,50`.
///
/// Empty input stays empty rather than rendering `0,00`. Leading zeros
/// collapse, so the mask preserves the numeric value but not the keystroke
/// count. Pasting an already formatted value with more than two decimals
/// shifts the amount, since the decimal point is implied by digit count.
#[must_use]
pub fn currency(raw: &str) -> String {
    let digits = unmask(raw);
    if digits.is_empty() {
        return String::new();
    }
    format_minor_digits(&digits, Currency::Brl)
}

/// Recovers the amount in centavos from a currency mask.
///
/// Returns `None` for empty input or amounts that do not fit in an `i64`.
#[must_use]
pub fn currency_cents(display: &str) -> Option<i64> {
    let digits = unmask(display);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Masks a bank agency (branch) number: up to 4 digits, no separators.
#[must_use]
pub fn agency(raw: &str) -> String {
    digits_up_to(raw, AGENCY_MAX_LEN)
}

/// Masks a bank account number as `00000-0`, the last digit being the
/// verifier. A single digit renders without a dash.
#[must_use]
pub fn account_number(raw: &str) -> String {
    let digits = digits_up_to(raw, ACCOUNT_MAX_LEN);
    if digits.len() < 2 {
        return digits;
    }
    let (body, verifier) = digits.split_at(digits.len() - 1);
    format!("{body}-{verifier}")
}

/// Which mask a [`MaskedField`] was built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    Cpf,
    Phone,
    Currency,
    Agency,
    AccountNumber,
}

impl MaskKind {
    /// Applies the mask for this kind.
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::Cpf => cpf(raw),
            Self::Phone => phone(raw),
            Self::Currency => currency(raw),
            Self::Agency => agency(raw),
            Self::AccountNumber => account_number(raw),
        }
    }
}

impl TryFrom<&str> for MaskKind {
    type Error = RulesError;

    fn try_from(value: &str) -> ResultRules<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cpf" => Ok(Self::Cpf),
            "phone" => Ok(Self::Phone),
            "currency" => Ok(Self::Currency),
            "agency" => Ok(Self::Agency),
            "account" | "account_number" => Ok(Self::AccountNumber),
            other => Err(RulesError::UnknownMask(other.to_string())),
        }
    }
}

/// A field value as shown on screen together with the digits behind it.
///
/// `unmask(display) == raw` always holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedField {
    pub kind: MaskKind,
    pub display: String,
    pub raw: String,
}

impl MaskedField {
    /// Masks `input` with `kind`, keeping the raw digits that survived.
    #[must_use]
    pub fn new(kind: MaskKind, input: &str) -> Self {
        let display = kind.apply(input);
        let raw = unmask(&display);
        Self { kind, display, raw }
    }

    /// Re-applies the mask after an edit.
    pub fn update(&mut self, input: &str) {
        *self = Self::new(self.kind, input);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_unlocks_separators_by_digit_count() {
        assert_eq!(cpf(""), "");
        assert_eq!(cpf("1"), "1");
        assert_eq!(cpf("123"), "123");
        assert_eq!(cpf("1234"), "123.4");
        assert_eq!(cpf("1234567"), "123.456.7");
        assert_eq!(cpf("1234567890"), "123.456.789-0");
        assert_eq!(cpf("52998224725"), "529.982.247-25");
    }

    #[test]
    fn cpf_truncates_over_length_input() {
        assert_eq!(cpf("5299822472599"), "529.982.247-25");
    }

    #[test]
    fn cpf_unmask_recovers_every_prefix() {
        let full = "52998224725";
        for end in 0..=full.len() {
            let raw = &full[..end];
            assert_eq!(unmask(&cpf(raw)), raw);
        }
    }

    #[test]
    fn cpf_is_idempotent() {
        for raw in ["5", "5299", "529982", "5299822", "52998224725"] {
            let once = cpf(raw);
            assert_eq!(cpf(&once), once);
        }
    }

    #[test]
    fn phone_full_mobile_number() {
        assert_eq!(phone("85999998888"), "(85) 99999-8888");
    }

    #[test]
    fn phone_partial_patterns() {
        assert_eq!(phone(""), "");
        assert_eq!(phone("8"), "(8");
        assert_eq!(phone("85"), "(85");
        assert_eq!(phone("859"), "(85) 9");
        assert_eq!(phone("859999"), "(85) 9999");
        assert_eq!(phone("8599999"), "(85) 9999-9");
        assert_eq!(phone("8533334444"), "(85) 3333-4444");
    }

    #[test]
    fn phone_truncates_and_is_idempotent() {
        assert_eq!(phone("8599999888877"), "(85) 99999-8888");
        let once = phone("8599999");
        assert_eq!(phone(&once), once);
        assert_eq!(unmask(&phone("85999998888")), "85999998888");
    }

    #[test]
    fn phone_validity() {
        assert!(is_valid_phone("(85) 99999-8888"));
        assert!(is_valid_phone("8533334444"));
        assert!(!is_valid_phone("85899998888"));
        assert!(!is_valid_phone("(05) 99999-8888"));
        assert!(!is_valid_phone("(80) 99999-8888"));
        assert!(!is_valid_phone("859999"));
    }

    #[test]
    fn currency_examples() {
        assert_eq!(currency(""), "");
        assert_eq!(currency("1"), "0,01");
        assert_eq!(currency("100"), "1,00");
        assert_eq!(currency("100050"), "1.000,50");
        assert_eq!(currency("00100"), "1,00");
    }

    #[test]
    fn currency_keeps_numeric_value() {
        for raw in ["7", "100", "100050", "123456789", "000042"] {
            let expected: i64 = raw.parse().unwrap();
            assert_eq!(currency_cents(&currency(raw)), Some(expected));
        }
        assert_eq!(currency_cents(""), None);
    }

    #[test]
    fn currency_is_idempotent() {
        let once = currency("100050");
        assert_eq!(currency(&once), once);
    }

    #[test]
    fn bank_masks() {
        assert_eq!(agency("12345"), "1234");
        assert_eq!(account_number(""), "");
        assert_eq!(account_number("1"), "1");
        assert_eq!(account_number("123456"), "12345-6");
        assert_eq!(account_number(&account_number("123456")), "12345-6");
    }

    #[test]
    fn masked_field_tracks_raw_digits() {
        let mut field = MaskedField::new(MaskKind::Phone, "85");
        assert_eq!(field.display, "(85");
        field.update("(85) 99999-88889999");
        assert_eq!(field.display, "(85) 99999-8888");
        assert_eq!(field.raw, "85999998888");
        assert!(MaskedField::new(MaskKind::Currency, "").is_empty());
    }

    #[test]
    fn mask_kind_parses_names() {
        assert_eq!(MaskKind::try_from(" Phone "), Ok(MaskKind::Phone));
        assert_eq!(MaskKind::try_from("account"), Ok(MaskKind::AccountNumber));
        assert_eq!(
            MaskKind::try_from("iban"),
            Err(RulesError::UnknownMask("iban".to_string()))
        );
    }
}
