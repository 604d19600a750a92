//! The module contains the errors the rule set can return.
//!
//! The validators themselves are total and report failures as plain values
//! (`bool`, [`PasswordPolicyResult`]); [`RulesError`] is only returned by
//! conversions that can fail:
//!
//! - [`InvalidCpf`] when building a [`Cpf`] from input that fails the check digits.
//! - [`InvalidDay`] when a transfer day is outside the interval domain.
//! - [`UnknownStatus`] when an account status label is not recognized.
//!
//!  [`PasswordPolicyResult`]: crate::PasswordPolicyResult
//!  [`Cpf`]: crate::Cpf
//!  [`InvalidCpf`]: RulesError::InvalidCpf
//!  [`InvalidDay`]: RulesError::InvalidDay
//!  [`UnknownStatus`]: RulesError::UnknownStatus
use thiserror::Error;

/// Rule set errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Invalid CPF: {0}")]
    InvalidCpf(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transfer day {day} for {interval} interval")]
    InvalidDay { interval: String, day: i32 },
    #[error("Unknown transfer interval: \"{0}\"")]
    UnknownInterval(String),
    #[error("Unknown account status: \"{0}\"")]
    UnknownStatus(String),
    #[error("Unknown mask: \"{0}\"")]
    UnknownMask(String),
    #[error("Invalid payout account: {0}")]
    InvalidAccount(String),
}
