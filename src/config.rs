//! Engine configuration

use log::warn;
use std::env;

/// Default simulation cap: 50 years of monthly steps
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Environment variable overriding the simulation cap
pub const MAX_MONTHS_ENV: &str = "PAYOFF_MAX_MONTHS";

/// Configuration for a payoff projection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoffConfig {
    /// Hard cap on simulated months; debts still owing at the cap report no payoff date
    pub max_months: u32,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
        }
    }
}

impl PayoffConfig {
    /// Build config from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let max_months = match env::var(MAX_MONTHS_ENV) {
            Ok(raw) => parse_max_months(&raw).unwrap_or_else(|| {
                warn!(
                    "{}='{}' is not a positive integer, using {}",
                    MAX_MONTHS_ENV, raw, DEFAULT_MAX_MONTHS
                );
                DEFAULT_MAX_MONTHS
            }),
            Err(_) => DEFAULT_MAX_MONTHS,
        };

        Self { max_months }
    }

    /// Override the cap, ignoring zero
    pub fn with_max_months(mut self, max_months: Option<u32>) -> Self {
        if let Some(months) = max_months.filter(|m| *m > 0) {
            self.max_months = months;
        }
        self
    }
}

fn parse_max_months(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|m| *m > 0)
}
