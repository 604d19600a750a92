//! Submit-time validation of whole forms.
//!
//! Each form holds the values exactly as typed (masked or not). `validate`
//! runs every field rule, collects one message per failing field and, when
//! nothing fails, returns the unmasked request body ready to be sent.

use std::fmt;

use api_types::{
    Currency as WireCurrency,
    payout::{BankAccountNew, WithdrawalNew},
    user::{PasswordChange, Register},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    Money,
    banks::{BankDirectory, is_valid_bank_code},
    cpf,
    mask::{self, ACCOUNT_MAX_LEN, AGENCY_MAX_LEN},
    password::{PasswordPolicy, PasswordRejection, validate_full_name},
};

/// A rejected field and the message to show next to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn finish<T>(self, form: &'static str, ok: impl FnOnce() -> T) -> Result<T, FormErrors> {
        if self.is_empty() {
            return Ok(ok());
        }
        tracing::debug!(form, errors = self.len(), "form rejected");
        Err(self)
    }
}

impl IntoIterator for FormErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

const FULL_NAME_REQUIRED: &str = "Informe nome e sobrenome.";
const INVALID_CPF: &str = "CPF inválido.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self, policy: &PasswordPolicy) -> Result<Register, FormErrors> {
        let mut errors = FormErrors::default();

        if !validate_full_name(&self.name) {
            errors.push("name", FULL_NAME_REQUIRED);
        }
        if !cpf::validate(&self.cpf) {
            errors.push("cpf", INVALID_CPF);
        }
        if !mask::is_valid_phone(&self.phone) {
            errors.push("phone", "Telefone inválido.");
        }
        match policy.validate(&self.password).into_result() {
            Err(reason) => errors.push("password", reason.message()),
            Ok(()) if self.password != self.confirm_password => {
                errors.push("confirm_password", PasswordRejection::Mismatch.message());
            }
            Ok(()) => {}
        }

        errors.finish("registration", || Register {
            name: collapse_whitespace(&self.name),
            cpf: mask::unmask(&self.cpf),
            phone: mask::unmask(&self.phone),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasswordChangeForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChangeForm {
    pub fn validate(&self, policy: &PasswordPolicy) -> Result<PasswordChange, FormErrors> {
        let mut errors = FormErrors::default();

        if self.current_password.is_empty() {
            errors.push("current_password", "Informe a senha atual.");
        }
        let result = policy.validate_change(
            &self.current_password,
            &self.new_password,
            &self.confirm_password,
        );
        if let Err(reason) = result.into_result() {
            let field = match reason {
                PasswordRejection::Mismatch => "confirm_password",
                _ => "new_password",
            };
            errors.push(field, reason.message());
        }

        errors.finish("password_change", || PasswordChange {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BankAccountForm {
    pub holder_name: String,
    pub holder_cpf: String,
    pub bank_code: String,
    pub agency: String,
    pub account_number: String,
}

impl BankAccountForm {
    /// Validates the bank details. When `banks` is given, the bank code must
    /// also be listed in it.
    pub fn validate(&self, banks: Option<&BankDirectory>) -> Result<BankAccountNew, FormErrors> {
        let mut errors = FormErrors::default();

        if !validate_full_name(&self.holder_name) {
            errors.push("holder_name", FULL_NAME_REQUIRED);
        }
        if !cpf::validate(&self.holder_cpf) {
            errors.push("holder_cpf", INVALID_CPF);
        }

        let bank_code = self.bank_code.trim();
        let known = banks.is_none_or(|dir| dir.by_code(bank_code).is_some());
        if !is_valid_bank_code(bank_code) || !known {
            errors.push("bank_code", "Selecione um banco válido.");
        }

        let agency = mask::unmask(&self.agency);
        if agency.is_empty() || agency.len() > AGENCY_MAX_LEN {
            errors.push("agency", "Agência inválida.");
        }
        let account_number = mask::unmask(&self.account_number);
        if account_number.len() < 2 || account_number.len() > ACCOUNT_MAX_LEN {
            errors.push("account_number", "Número da conta inválido.");
        }

        errors.finish("bank_account", || BankAccountNew {
            holder_name: collapse_whitespace(&self.holder_name),
            holder_cpf: mask::unmask(&self.holder_cpf),
            bank_code: bank_code.to_string(),
            agency,
            account_number,
        })
    }
}

/// Manual withdrawal of part of the available balance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalForm {
    /// Amount as typed in the currency mask.
    pub amount: String,
    pub available: Money,
}

impl WithdrawalForm {
    pub fn validate(&self) -> Result<WithdrawalNew, FormErrors> {
        let mut errors = FormErrors::default();

        let amount = match mask::currency_cents(&self.amount) {
            None if mask::unmask(&self.amount).is_empty() => {
                errors.push("amount", "Informe o valor.");
                Money::ZERO
            }
            None => {
                errors.push("amount", "Valor inválido.");
                Money::ZERO
            }
            Some(0) => {
                errors.push("amount", "O valor deve ser maior que zero.");
                Money::ZERO
            }
            Some(cents) if Money::new(cents) > self.available => {
                errors.push("amount", "Saldo insuficiente.");
                Money::new(cents)
            }
            Some(cents) => Money::new(cents),
        };

        errors.finish("withdrawal", || WithdrawalNew {
            amount_minor: amount.minor(),
            currency: WireCurrency::Brl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::Bank;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            name: "  Maria   Silva ".to_string(),
            cpf: "529.982.247-25".to_string(),
            phone: "(85) 99999-8888".to_string(),
            password: "abcdef1!".to_string(),
            confirm_password: "abcdef1!".to_string(),
        }
    }

    #[test]
    fn registration_sends_raw_digits() {
        let body = registration().validate(&PasswordPolicy::default()).unwrap();
        assert_eq!(body.name, "Maria Silva");
        assert_eq!(body.cpf, "52998224725");
        assert_eq!(body.phone, "85999998888");
    }

    #[test]
    fn registration_collects_every_failure() {
        let form = RegistrationForm {
            name: "Maria".to_string(),
            cpf: "111.111.111-11".to_string(),
            phone: "123".to_string(),
            password: "abcdef".to_string(),
            confirm_password: String::new(),
        };
        let errors = form.validate(&PasswordPolicy::default()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("name"), Some(FULL_NAME_REQUIRED));
        assert_eq!(errors.get("cpf"), Some(INVALID_CPF));
        assert!(errors.get("phone").is_some());
        assert_eq!(
            errors.get("password"),
            Some(PasswordRejection::NoDigit.message())
        );
        // Confirmation is only checked once the password itself is valid.
        assert_eq!(errors.get("confirm_password"), None);
    }

    #[test]
    fn registration_mismatch_is_reported_on_confirmation() {
        let mut form = registration();
        form.confirm_password = "abcdef1?".to_string();
        let errors = form.validate(&PasswordPolicy::default()).unwrap_err();
        assert_eq!(
            errors.get("confirm_password"),
            Some(PasswordRejection::Mismatch.message())
        );
    }

    #[test]
    fn password_change_routes_reason_to_field() {
        let policy = PasswordPolicy::default();
        let form = PasswordChangeForm {
            current_password: "abcdef1!".to_string(),
            new_password: "abcdef1!".to_string(),
            confirm_password: "abcdef1!".to_string(),
        };
        let errors = form.validate(&policy).unwrap_err();
        assert_eq!(
            errors.get("new_password"),
            Some(PasswordRejection::SameAsCurrent.message())
        );

        let form = PasswordChangeForm {
            current_password: String::new(),
            new_password: "xyz123!?".to_string(),
            confirm_password: "xyz123!".to_string(),
        };
        let errors = form.validate(&policy).unwrap_err();
        assert!(errors.get("current_password").is_some());
        assert_eq!(
            errors.get("confirm_password"),
            Some(PasswordRejection::Mismatch.message())
        );
    }

    #[test]
    fn bank_account_checks_directory() {
        let form = BankAccountForm {
            holder_name: "Maria Silva".to_string(),
            holder_cpf: "52998224725".to_string(),
            bank_code: "260".to_string(),
            agency: "0001".to_string(),
            account_number: "12345-6".to_string(),
        };
        let body = form.validate(None).unwrap();
        assert_eq!(body.account_number, "123456");
        assert_eq!(body.agency, "0001");

        let dir = BankDirectory::new([Bank {
            code: "341".to_string(),
            name: "Itaú".to_string(),
        }]);
        let errors = form.validate(Some(&dir)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("bank_code").is_some());
    }

    #[test]
    fn bank_account_rejects_short_account_number() {
        let form = BankAccountForm {
            holder_name: "Maria Silva".to_string(),
            holder_cpf: "52998224725".to_string(),
            bank_code: "26".to_string(),
            agency: String::new(),
            account_number: "1".to_string(),
        };
        let errors = form.validate(None).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["bank_code", "agency", "account_number"]);
    }

    #[test]
    fn withdrawal_amount_rules() {
        let form = |amount: &str| WithdrawalForm {
            amount: amount.to_string(),
            available: Money::new(10_000),
        };
        assert_eq!(form("").validate().unwrap_err().get("amount"), Some("Informe o valor."));
        assert!(form("0,00").validate().is_err());
        assert_eq!(
            form("100,01").validate().unwrap_err().get("amount"),
            Some("Saldo insuficiente.")
        );
        let body = form("1.000").validate().unwrap();
        assert_eq!(body.amount_minor, 1_000);
    }
}
