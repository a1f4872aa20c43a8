//! Month-by-month simulation output

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::debt::DebtId;
use super::money::{sum_cents, ZERO_CENTS};
use super::state::SimulationState;

/// One simulated month across all debts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// 1-indexed month
    pub month: u32,

    /// Post-payment balance per debt
    pub balances: BTreeMap<DebtId, Decimal>,

    /// Total paid this month per debt (minimum plus any extra)
    pub payments: BTreeMap<DebtId, Decimal>,

    /// Interest charged this month per debt
    pub interest: BTreeMap<DebtId, Decimal>,

    /// Extra pool available this month (extra payment plus freed minimums)
    pub extra_pool: Decimal,

    /// Debts whose balance first reached zero this month
    pub paid_off: Vec<DebtId>,
}

impl MonthSnapshot {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            balances: BTreeMap::new(),
            payments: BTreeMap::new(),
            interest: BTreeMap::new(),
            extra_pool: ZERO_CENTS,
            paid_off: Vec::new(),
        }
    }

    pub fn record_payment(&mut self, id: DebtId, amount: Decimal) {
        if amount > Decimal::ZERO {
            let paid = self.payments.entry(id).or_insert(ZERO_CENTS);
            *paid = paid.saturating_add(amount);
        }
    }

    pub fn payment(&self, id: DebtId) -> Decimal {
        self.payments.get(&id).copied().unwrap_or(ZERO_CENTS)
    }

    pub fn balance(&self, id: DebtId) -> Decimal {
        self.balances.get(&id).copied().unwrap_or(ZERO_CENTS)
    }

    pub fn total_paid(&self) -> Decimal {
        sum_cents(self.payments.values().copied())
    }

    pub fn total_balance(&self) -> Decimal {
        sum_cents(self.balances.values().copied())
    }
}

/// Complete simulation output
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationHistory {
    /// Extra monthly payment the simulation ran with
    pub extra_payment: Decimal,

    /// One snapshot per simulated month, in order
    pub snapshots: Vec<MonthSnapshot>,

    /// State after the last simulated month
    pub final_state: SimulationState,

    /// Stopped at the month cap with debt outstanding
    pub cap_reached: bool,
}

impl SimulationHistory {
    pub fn months_simulated(&self) -> u32 {
        self.snapshots.len() as u32
    }

    pub fn payoff_month(&self, id: DebtId) -> Option<u32> {
        self.final_state.payoff_month.get(&id).copied()
    }

    pub fn total_interest(&self) -> Decimal {
        self.final_state.total_interest()
    }

    /// Total paid across all debts over the whole simulation
    pub fn total_paid(&self) -> Decimal {
        sum_cents(self.snapshots.iter().map(MonthSnapshot::total_paid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_record_payment_accumulates() {
        let mut snapshot = MonthSnapshot::new(1);
        snapshot.record_payment(1, dec!(50));
        snapshot.record_payment(1, dec!(25.50));
        snapshot.record_payment(2, Decimal::ZERO);
        assert_eq!(snapshot.payment(1), dec!(75.50));
        assert!(!snapshot.payments.contains_key(&2));
        assert_eq!(snapshot.total_paid(), dec!(75.50));
    }

    #[test]
    fn test_totals() {
        let mut snapshot = MonthSnapshot::new(4);
        snapshot.balances.insert(1, dec!(100));
        snapshot.balances.insert(2, dec!(250.25));
        assert_eq!(snapshot.total_balance(), dec!(350.25));
        assert_eq!(snapshot.balance(3), Decimal::ZERO);
    }
}
