//! Payout account lifecycle.
//!
//! An account is created `PENDING_VALIDATION` when bank details are first
//! submitted; only the server moves it to `ACTIVE` or `INACTIVE`. The rule set
//! renders and validates whatever status it receives and never promotes it.

use std::fmt;

use api_types::payout as wire;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ResultRules, RulesError,
    schedule::{TransferInterval, TransferSchedule, is_valid_day},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    PendingValidation,
    Active,
    Inactive,
}

impl AccountStatus {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingValidation => "PENDING_VALIDATION",
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }

    /// User-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::PendingValidation => "Em validação",
            Self::Active => "Ativa",
            Self::Inactive => "Inativa",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AccountStatus {
    type Error = RulesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "PENDING_VALIDATION" => Ok(Self::PendingValidation),
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            other => Err(RulesError::UnknownStatus(other.to_string())),
        }
    }
}

/// Maps a raw status value to its label, failing on unknown values.
pub fn display_status(raw: &str) -> ResultRules<&'static str> {
    AccountStatus::try_from(raw).map(AccountStatus::label)
}

impl From<wire::TransferInterval> for TransferInterval {
    fn from(value: wire::TransferInterval) -> Self {
        match value {
            wire::TransferInterval::Daily => Self::Daily,
            wire::TransferInterval::Weekly => Self::Weekly,
            wire::TransferInterval::Monthly => Self::Monthly,
        }
    }
}

impl From<TransferInterval> for wire::TransferInterval {
    fn from(value: TransferInterval) -> Self {
        match value {
            TransferInterval::Daily => Self::Daily,
            TransferInterval::Weekly => Self::Weekly,
            TransferInterval::Monthly => Self::Monthly,
        }
    }
}

/// The bank account a courier withdraws earnings to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutAccount {
    /// Server id; `None` until the account has been created remotely.
    pub id: Option<Uuid>,
    pub status: AccountStatus,
    pub automatic_transfer: bool,
    pub transfer_interval: Option<TransferInterval>,
    pub transfer_day: Option<i32>,
}

impl Default for PayoutAccount {
    fn default() -> Self {
        Self {
            id: None,
            status: AccountStatus::PendingValidation,
            automatic_transfer: false,
            transfer_interval: None,
            transfer_day: None,
        }
    }
}

impl PayoutAccount {
    /// Schedule configuration needs an account that exists server-side.
    #[must_use]
    pub fn can_configure_schedule(&self) -> bool {
        self.id.is_some()
    }

    /// Checks the schedule fields against each other:
    ///
    /// - automatic transfers need an interval;
    /// - a day is present exactly when the transfer is automatic and the
    ///   interval is not daily;
    /// - the day lies in the interval's domain.
    pub fn validate(&self) -> ResultRules<()> {
        if !self.automatic_transfer {
            if self.transfer_day.is_some() {
                return Err(RulesError::InvalidAccount(
                    "transfer day set without automatic transfer".to_string(),
                ));
            }
            return Ok(());
        }

        let interval = self.transfer_interval.ok_or_else(|| {
            RulesError::InvalidAccount("automatic transfer requires an interval".to_string())
        })?;

        match (interval, self.transfer_day) {
            (TransferInterval::Daily, None) => Ok(()),
            (TransferInterval::Daily, Some(_)) => Err(RulesError::InvalidAccount(
                "daily transfers have no transfer day".to_string(),
            )),
            (_, None) => Err(RulesError::InvalidAccount(format!(
                "{interval} transfers require a transfer day"
            ))),
            (_, Some(day)) if !is_valid_day(interval, day) => Err(RulesError::InvalidDay {
                interval: interval.to_string(),
                day,
            }),
            (_, Some(_)) => Ok(()),
        }
    }

    /// The effective automatic schedule, if automatic transfer is enabled.
    pub fn schedule(&self) -> ResultRules<Option<TransferSchedule>> {
        self.validate()?;
        match (self.automatic_transfer, self.transfer_interval) {
            (true, Some(interval)) => {
                TransferSchedule::with_day(interval, self.transfer_day).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Enables (`Some`) or disables (`None`) automatic transfer.
    pub fn configure_schedule(
        &mut self,
        schedule: Option<TransferSchedule>,
    ) -> ResultRules<()> {
        if !self.can_configure_schedule() {
            return Err(RulesError::InvalidAccount(
                "payout account does not exist yet".to_string(),
            ));
        }
        match schedule {
            Some(schedule) => {
                self.automatic_transfer = true;
                self.transfer_interval = Some(schedule.interval());
                self.transfer_day = schedule.day();
            }
            None => {
                self.automatic_transfer = false;
                self.transfer_interval = None;
                self.transfer_day = None;
            }
        }
        Ok(())
    }

    /// Request body for the automatic transfer settings of this account.
    pub fn transfer_update(&self) -> ResultRules<wire::AutomaticTransferUpdate> {
        let schedule = self.schedule()?;
        Ok(wire::AutomaticTransferUpdate {
            automatic_transfer: schedule.is_some(),
            transfer_interval: schedule.map(|s| s.interval().into()),
            transfer_day: schedule.and_then(|s| s.day()),
        })
    }
}

/// Free-function form of [`PayoutAccount::can_configure_schedule`].
#[must_use]
pub fn can_configure_schedule(account: &PayoutAccount) -> bool {
    account.can_configure_schedule()
}

impl TryFrom<wire::BankAccount> for PayoutAccount {
    type Error = RulesError;

    fn try_from(value: wire::BankAccount) -> Result<Self, Self::Error> {
        let account = Self {
            id: value.id,
            status: AccountStatus::try_from(value.status.as_str())?,
            automatic_transfer: value.automatic_transfer,
            transfer_interval: value.transfer_interval.map(Into::into),
            transfer_day: value.transfer_day,
        };
        account.validate()?;
        Ok(account)
    }
}
