use std::env;

use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::EngineError;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub api_prefix: String,
    /// Engine defaults, overridable per process/preview request
    pub payroll: PayrollConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://payrollms.db".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
            payroll: PayrollConfig::from_env(),
        }
    }
}

/// How late/absent occurrences convert into a peso deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LateDeductionMode {
    /// late costs `late_rate` of a daily wage, an absence a full day
    Percent,
    /// late/absent each cost a flat peso amount
    FixedAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PayrollConfig {
    pub late_deduction_mode: LateDeductionMode,

    /// Percent mode: fraction of a daily wage per late occurrence.
    /// Fixed mode: peso amount per late occurrence.
    #[schema(example = 0.05)]
    pub late_rate: f64,

    /// Fixed mode only: peso amount per absence. Ignored in percent mode,
    /// where an absence always costs a full daily wage.
    #[schema(example = 0.0)]
    pub absent_rate: f64,

    #[schema(example = 22)]
    pub work_days_per_month: u32,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            late_deduction_mode: LateDeductionMode::Percent,
            late_rate: 0.05,
            absent_rate: 0.0,
            work_days_per_month: 22,
        }
    }
}

impl PayrollConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let late_deduction_mode = match env::var("LATE_DEDUCTION_MODE").as_deref() {
            Ok("fixed_amount") => LateDeductionMode::FixedAmount,
            _ => LateDeductionMode::Percent,
        };

        Self {
            late_deduction_mode,
            late_rate: env_f64("LATE_RATE", defaults.late_rate),
            absent_rate: env_f64("ABSENT_RATE", defaults.absent_rate),
            work_days_per_month: env::var("WORK_DAYS_PER_MONTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.work_days_per_month),
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(1..=31).contains(&self.work_days_per_month) {
            return Err(EngineError::Validation(format!(
                "work_days_per_month must be between 1 and 31, got {}",
                self.work_days_per_month
            )));
        }
        if self.late_rate < 0.0 || self.absent_rate < 0.0 {
            return Err(EngineError::Validation(
                "deduction rates cannot be negative".to_string(),
            ));
        }
        if self.late_deduction_mode == LateDeductionMode::Percent && self.late_rate > 1.0 {
            return Err(EngineError::Validation(format!(
                "late_rate {} is not a valid fraction of a daily wage",
                self.late_rate
            )));
        }
        Ok(())
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PayrollConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_workdays() {
        let cfg = PayrollConfig {
            work_days_per_month: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_percent_rate_above_one() {
        let cfg = PayrollConfig {
            late_rate: 50.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn fixed_mode_allows_peso_rates() {
        let cfg = PayrollConfig {
            late_deduction_mode: LateDeductionMode::FixedAmount,
            late_rate: 50.0,
            absent_rate: 500.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
