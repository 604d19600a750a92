//! Financial identity and payout configuration rules.
//!
//! Everything here is a pure function of its inputs: the form layer feeds raw
//! field values in on every edit (masks) and once on submit (validation), and
//! forwards the resulting request body to the network client itself.
//!
//! - [`cpf`]: CPF check digit validation.
//! - [`mask`]: incremental display masks for CPF, phone, currency and bank
//!   account fields.
//! - [`password`]: password strength and password change policy.
//! - [`schedule`]: automatic withdrawal interval/day model and fee disclosure.
//! - [`account`]: payout account status and schedule invariants.
//! - [`forms`]: whole-form validation producing `api_types` request bodies.
//! - [`banks`] and [`cache`]: bank picker directory and its expiring cache.

pub use account::{AccountStatus, PayoutAccount, can_configure_schedule, display_status};
pub use cpf::Cpf;
pub use currency::Currency;
pub use error::RulesError;
pub use mask::{MaskKind, MaskedField};
pub use money::Money;
pub use password::{
    PasswordPolicy, PasswordPolicyResult, PasswordRejection, validate_change, validate_full_name,
    validate_password,
};
pub use schedule::{
    DEFAULT_TRANSFER_FEE, FeeDisclosure, FeeTone, TransferInterval, TransferSchedule,
    default_day, fee_disclosure, is_valid_day,
};

pub mod account;
pub mod banks;
pub mod cache;
pub mod cpf;
mod currency;
mod error;
pub mod forms;
pub mod mask;
mod money;
pub mod password;
pub mod schedule;

pub type ResultRules<T> = Result<T, RulesError>;
