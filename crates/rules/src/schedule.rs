//! Automatic withdrawal schedule.
//!
//! A schedule pairs a [`TransferInterval`] with a day whose domain depends on
//! the interval:
//!
//! | interval  | day domain              | default |
//! |-----------|-------------------------|---------|
//! | `Daily`   | none (day is ignored)   | none    |
//! | `Weekly`  | `0..=6`, 0 = Sunday     | `2`     |
//! | `Monthly` | `1..=31`                | `1`     |
//!
//! Changing the interval always resets the day to the new default, so a day
//! that is valid for one interval never leaks into another.

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Serialize};

use crate::{Currency, Money, ResultRules, RulesError};

/// Fee charged by the payment provider on every automatic transfer.
pub const DEFAULT_TRANSFER_FEE: Money = Money::new(3_67);

const WEEKDAY_LABELS: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferInterval {
    Daily,
    Weekly,
    Monthly,
}

impl TransferInterval {
    pub const ALL: [TransferInterval; 3] = [Self::Daily, Self::Weekly, Self::Monthly];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// User-facing name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Diário",
            Self::Weekly => "Semanal",
            Self::Monthly => "Mensal",
        }
    }

    /// Valid day values, or `None` when the interval has no day concept.
    pub fn day_range(self) -> Option<RangeInclusive<i32>> {
        match self {
            Self::Daily => None,
            Self::Weekly => Some(0..=6),
            Self::Monthly => Some(1..=31),
        }
    }
}

impl fmt::Display for TransferInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TransferInterval {
    type Error = RulesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "daily" | "diário" | "diario" => Ok(Self::Daily),
            "weekly" | "semanal" => Ok(Self::Weekly),
            "monthly" | "mensal" => Ok(Self::Monthly),
            other => Err(RulesError::UnknownInterval(other.to_string())),
        }
    }
}

/// Returns `true` if `day` is acceptable for `interval`.
///
/// `Daily` has no day, so any value is accepted and ignored.
#[must_use]
pub fn is_valid_day(interval: TransferInterval, day: i32) -> bool {
    match interval.day_range() {
        Some(range) => range.contains(&day),
        None => true,
    }
}

/// Day selected when switching to `interval`.
#[must_use]
pub fn default_day(interval: TransferInterval) -> Option<i32> {
    match interval {
        TransferInterval::Daily => None,
        TransferInterval::Weekly => Some(2),
        TransferInterval::Monthly => Some(1),
    }
}

/// Human readable day for `interval`, e.g. `Terça-feira` or `Dia 15`.
#[must_use]
pub fn day_label(interval: TransferInterval, day: i32) -> Option<String> {
    if !is_valid_day(interval, day) {
        return None;
    }
    match interval {
        TransferInterval::Daily => None,
        TransferInterval::Weekly => usize::try_from(day)
            .ok()
            .and_then(|idx| WEEKDAY_LABELS.get(idx))
            .map(|label| (*label).to_string()),
        TransferInterval::Monthly => Some(format!("Dia {day}")),
    }
}

/// An interval plus the day it applies to.
///
/// The day is always valid for the interval: it can only be set through
/// [`set_day`](TransferSchedule::set_day) and is reset whenever the interval
/// changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransferSchedule {
    interval: TransferInterval,
    day: Option<i32>,
}

impl TransferSchedule {
    /// New schedule on the interval's default day.
    #[must_use]
    pub fn new(interval: TransferInterval) -> Self {
        Self {
            interval,
            day: default_day(interval),
        }
    }

    /// Builds a schedule from stored values, rejecting out-of-domain days.
    ///
    /// A missing day falls back to the default; a day on a `Daily` schedule
    /// is dropped.
    pub fn with_day(interval: TransferInterval, day: Option<i32>) -> ResultRules<Self> {
        let mut schedule = Self::new(interval);
        if let Some(day) = day {
            schedule.set_day(day)?;
        }
        Ok(schedule)
    }

    #[must_use]
    pub fn interval(&self) -> TransferInterval {
        self.interval
    }

    #[must_use]
    pub fn day(&self) -> Option<i32> {
        self.day
    }

    /// Switches interval. The day resets to the new interval's default
    /// unless the interval is unchanged.
    pub fn set_interval(&mut self, interval: TransferInterval) {
        if interval == self.interval {
            return;
        }
        *self = Self::new(interval);
    }

    /// Selects a day. Ignored for `Daily`.
    pub fn set_day(&mut self, day: i32) -> ResultRules<()> {
        if self.interval == TransferInterval::Daily {
            return Ok(());
        }
        if !is_valid_day(self.interval, day) {
            return Err(RulesError::InvalidDay {
                interval: self.interval.to_string(),
                day,
            });
        }
        self.day = Some(day);
        Ok(())
    }

    #[must_use]
    pub fn day_label(&self) -> Option<String> {
        self.day.and_then(|day| day_label(self.interval, day))
    }

    /// Fee disclosure for this schedule.
    #[must_use]
    pub fn fee_disclosure(&self, fee: Money) -> FeeDisclosure {
        fee_disclosure(self.interval, fee)
    }
}

impl fmt::Display for TransferSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day_label() {
            Some(day) => write!(f, "{} ({day})", self.interval.label()),
            None => f.write_str(self.interval.label()),
        }
    }
}

/// How a fee disclosure should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeTone {
    /// The fee adds up quickly; recommend a longer interval.
    Warning,
    Informational,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDisclosure {
    pub tone: FeeTone,
    pub message: String,
}

/// Explains how often `fee` is charged for `interval`.
///
/// Daily transfers are charged every day, so they get a warning that
/// recommends switching; weekly and monthly ones are charged once per cycle.
#[must_use]
pub fn fee_disclosure(interval: TransferInterval, fee: Money) -> FeeDisclosure {
    let fee = fee.format(Currency::Brl);
    match interval {
        TransferInterval::Daily => FeeDisclosure {
            tone: FeeTone::Warning,
            message: format!(
                "Atenção: a taxa de {fee} por transferência será cobrada todos os dias. \
                 Recomendamos escolher a transferência semanal ou mensal."
            ),
        },
        TransferInterval::Weekly => FeeDisclosure {
            tone: FeeTone::Informational,
            message: format!("A taxa de {fee} por transferência será cobrada uma vez por semana."),
        },
        TransferInterval::Monthly => FeeDisclosure {
            tone: FeeTone::Informational,
            message: format!("A taxa de {fee} por transferência será cobrada uma vez por mês."),
        },
    }
}
