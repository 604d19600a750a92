//! Request and response bodies exchanged with the payout API.
//!
//! Every field carries raw values: CPF, phone and account numbers are plain
//! digit strings and amounts are integer centavos, never display masks.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Brl,
}

pub mod user {
    use super::*;

    /// Registration body for a new courier/organizer.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Register {
        pub name: String,
        /// 11 raw digits.
        pub cpf: String,
        /// DDD + subscriber digits.
        pub phone: String,
        pub password: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PasswordChange {
        pub current_password: String,
        pub new_password: String,
    }
}

pub mod payout {
    use super::*;

    /// Automatic withdrawal cadence.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransferInterval {
        Daily,
        Weekly,
        Monthly,
    }

    /// Body for submitting bank details.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BankAccountNew {
        pub holder_name: String,
        pub holder_cpf: String,
        /// 3-digit bank code (COMPE).
        pub bank_code: String,
        pub agency: String,
        /// Account digits, verifier included as the last digit.
        pub account_number: String,
    }

    /// Payout account as returned by the server.
    ///
    /// `status` is kept as a plain string so an unexpected value surfaces as
    /// an error when converted, instead of failing the whole response.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BankAccount {
        pub id: Option<Uuid>,
        pub status: String,
        pub bank_code: Option<String>,
        pub agency: Option<String>,
        pub account_number: Option<String>,
        #[serde(default)]
        pub automatic_transfer: bool,
        pub transfer_interval: Option<TransferInterval>,
        pub transfer_day: Option<i32>,
        /// RFC3339 timestamp of the last status change.
        pub updated_at: Option<DateTime<FixedOffset>>,
    }

    /// Body for updating the automatic withdrawal settings.
    ///
    /// `transfer_day` is omitted unless the transfer is automatic and the
    /// interval is weekly or monthly.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AutomaticTransferUpdate {
        pub automatic_transfer: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub transfer_interval: Option<TransferInterval>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub transfer_day: Option<i32>,
    }

    /// Body for a manual withdrawal.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct WithdrawalNew {
        pub amount_minor: i64,
        pub currency: Currency,
    }
}

pub mod bank {
    use super::*;

    /// One entry of the bank list served to the bank picker.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BankView {
        pub code: String,
        pub name: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct BankListResponse {
        pub banks: Vec<BankView>,
    }
}
