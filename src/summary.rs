//! Portfolio-level debt summary
//!
//! Totals plus the minimum-only debt-free month under each strategy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::debt::{validate_debts, Debt};
use crate::error::PayoffResult;
use crate::payoff::{round_cents, sum_cents, YearMonth, ZERO_CENTS};
use crate::scenario::ScenarioRunner;

/// Summary of a debt list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub total_debt: Decimal,
    pub debt_count: usize,
    pub total_minimum_payments: Decimal,

    /// Balance-weighted APR; None when nothing is owed
    pub weighted_average_interest_rate: Option<Decimal>,

    pub avalanche_months: Option<u32>,
    pub snowball_months: Option<u32>,
    pub debt_free_date_avalanche: Option<YearMonth>,
    pub debt_free_date_snowball: Option<YearMonth>,
}

impl DebtSummary {
    fn empty() -> Self {
        Self {
            total_debt: ZERO_CENTS,
            debt_count: 0,
            total_minimum_payments: ZERO_CENTS,
            weighted_average_interest_rate: None,
            avalanche_months: None,
            snowball_months: None,
            debt_free_date_avalanche: None,
            debt_free_date_snowball: None,
        }
    }

    /// Summarize `debts`, projecting both strategies with no extra payment
    pub fn compute(runner: &ScenarioRunner, debts: &[Debt]) -> PayoffResult<Self> {
        if debts.is_empty() {
            return Ok(Self::empty());
        }
        validate_debts(debts, Decimal::ZERO)?;

        let total_debt = sum_cents(debts.iter().map(|d| d.balance));
        let total_minimum_payments = sum_cents(debts.iter().map(|d| d.minimum_payment));
        let weighted_average_interest_rate = weighted_rate(debts, total_debt);

        let comparison = runner.compare_strategies(debts, Decimal::ZERO)?;
        let avalanche = &comparison.avalanche.projection;
        let snowball = &comparison.snowball.projection;

        Ok(Self {
            total_debt: round_cents(total_debt),
            debt_count: debts.len(),
            total_minimum_payments: round_cents(total_minimum_payments),
            weighted_average_interest_rate,
            avalanche_months: avalanche.total_months,
            snowball_months: snowball.total_months,
            debt_free_date_avalanche: avalanche.debt_free_date,
            debt_free_date_snowball: snowball.debt_free_date,
        })
    }
}

fn weighted_rate(debts: &[Debt], total_debt: Decimal) -> Option<Decimal> {
    if total_debt <= Decimal::ZERO {
        return None;
    }
    let weighted = debts
        .iter()
        .fold(Decimal::ZERO, |total, d| total.saturating_add(d.balance.saturating_mul(d.interest_rate)));
    weighted.checked_div(total_debt).map(round_cents)
}
