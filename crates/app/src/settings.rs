//! Handles settings for the application. Configuration is read from an
//! optional TOML file (`config/repasse.toml` by default) and from
//! `REPASSE__*` environment variables, e.g. `REPASSE__PAYOUT__TRANSFER_FEE_CENTS`.
use chrono::TimeDelta;
use config::{Config, ConfigError, Environment, File};
use rules::{DEFAULT_TRANSFER_FEE, Money, PasswordPolicy, password::MIN_PASSWORD_LENGTH};
use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config/repasse";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Payout {
    pub transfer_fee_cents: i64,
    pub password_min_length: usize,
}

impl Default for Payout {
    fn default() -> Self {
        Self {
            transfer_fee_cents: DEFAULT_TRANSFER_FEE.minor(),
            password_min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl Payout {
    pub fn transfer_fee(&self) -> Money {
        Money::new(self.transfer_fee_cents)
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::with_min_length(self.password_min_length)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Banks {
    pub ttl_seconds: i64,
}

impl Banks {
    /// How long a fetched bank list stays fresh.
    pub fn ttl(&self) -> Result<TimeDelta> {
        TimeDelta::try_seconds(self.ttl_seconds)
            .filter(|ttl| *ttl >= TimeDelta::zero())
            .ok_or_else(|| {
                AppError::Argument(format!("banks.ttl_seconds out of range: {}", self.ttl_seconds))
            })
    }
}

impl Default for Banks {
    fn default() -> Self {
        Self {
            ttl_seconds: 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub payout: Payout,
    pub banks: Banks,
}

impl Settings {
    pub fn new(path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)).required(false))
            .add_source(Environment::with_prefix("REPASSE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_policy() {
        let settings = Settings::default();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.payout.transfer_fee(), Money::new(367));
        assert_eq!(settings.payout.password_policy(), PasswordPolicy::default());
        assert_eq!(settings.banks.ttl_seconds, 86_400);
        assert_eq!(settings.banks.ttl().unwrap(), TimeDelta::days(1));
    }

    #[test]
    fn out_of_range_ttl_is_an_argument_error() {
        for ttl_seconds in [i64::MAX, -1] {
            let banks = Banks { ttl_seconds };
            assert!(matches!(banks.ttl(), Err(AppError::Argument(_))));
        }
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::new(Some("does/not/exist")).unwrap();
        assert_eq!(settings.payout.transfer_fee_cents, 367);
    }
}
