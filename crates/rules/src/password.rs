//! Credential policy.
//!
//! Rules are evaluated in a fixed order and the first failure wins, so the
//! user always sees one reason at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Why a password (or password change) was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PasswordRejection {
    TooShort,
    NoDigit,
    NoSpecialChar,
    Mismatch,
    SameAsCurrent,
}

impl PasswordRejection {
    /// Message shown next to the password field.
    pub fn message(self) -> &'static str {
        match self {
            Self::TooShort => "A senha é curta demais.",
            Self::NoDigit => "A senha deve conter pelo menos um número.",
            Self::NoSpecialChar => "A senha deve conter pelo menos um caractere especial.",
            Self::Mismatch => "As senhas não coincidem.",
            Self::SameAsCurrent => "A nova senha deve ser diferente da senha atual.",
        }
    }
}

impl fmt::Display for PasswordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a password check. Built fresh on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicyResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<PasswordRejection>,
}

impl PasswordPolicyResult {
    pub const VALID: PasswordPolicyResult = PasswordPolicyResult {
        valid: true,
        reason: None,
    };

    #[must_use]
    pub const fn rejected(reason: PasswordRejection) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    /// Converts into a `Result`, handy with `?` in form code.
    pub fn into_result(self) -> Result<(), PasswordRejection> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }
}

/// Password strength policy.
///
/// The default policy is the one enforced by the platform; `min_length` can
/// only be raised from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordPolicy {
    /// Builds a policy with a custom minimum length, never below
    /// [`MIN_PASSWORD_LENGTH`].
    #[must_use]
    pub fn with_min_length(min_length: usize) -> Self {
        Self {
            min_length: min_length.max(MIN_PASSWORD_LENGTH),
        }
    }

    #[must_use]
    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Checks length, digit and special-character rules in that order.
    #[must_use]
    pub fn validate(&self, candidate: &str) -> PasswordPolicyResult {
        if candidate.chars().count() < self.min_length {
            return PasswordPolicyResult::rejected(PasswordRejection::TooShort);
        }
        if !candidate.chars().any(|c| c.is_ascii_digit()) {
            return PasswordPolicyResult::rejected(PasswordRejection::NoDigit);
        }
        if !candidate.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return PasswordPolicyResult::rejected(PasswordRejection::NoSpecialChar);
        }
        PasswordPolicyResult::VALID
    }

    /// Checks a password change: the new password must pass [`validate`],
    /// match its confirmation and differ from the current one.
    ///
    /// [`validate`]: PasswordPolicy::validate
    #[must_use]
    pub fn validate_change(
        &self,
        current: &str,
        new: &str,
        confirm_new: &str,
    ) -> PasswordPolicyResult {
        let strength = self.validate(new);
        if !strength.valid {
            return strength;
        }
        if new != confirm_new {
            return PasswordPolicyResult::rejected(PasswordRejection::Mismatch);
        }
        if new == current {
            return PasswordPolicyResult::rejected(PasswordRejection::SameAsCurrent);
        }
        PasswordPolicyResult::VALID
    }
}

/// [`PasswordPolicy::validate`] with the default policy.
#[must_use]
pub fn validate_password(candidate: &str) -> PasswordPolicyResult {
    PasswordPolicy::default().validate(candidate)
}

/// [`PasswordPolicy::validate_change`] with the default policy.
#[must_use]
pub fn validate_change(current: &str, new: &str, confirm_new: &str) -> PasswordPolicyResult {
    PasswordPolicy::default().validate_change(current, new, confirm_new)
}

/// Returns `true` when `name` has at least a first and a last name.
#[must_use]
pub fn validate_full_name(name: &str) -> bool {
    name.split_whitespace().count() >= 2
}
