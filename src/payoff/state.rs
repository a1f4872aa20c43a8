//! Running simulation state across all debts

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::debt::{Debt, DebtId};
use super::money::{round_cents, sum_cents, ZERO_CENTS};

/// State of every debt at a point in the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// Months elapsed (0 before the first month is simulated)
    pub month_index: u32,

    /// Running balance per debt
    pub balances: BTreeMap<DebtId, Decimal>,

    /// Total interest charged so far per debt
    pub cumulative_interest: BTreeMap<DebtId, Decimal>,

    /// Month at which each debt first reached zero (0 = paid off at input)
    pub payoff_month: BTreeMap<DebtId, u32>,

    /// Minimum payments released by paid-off debts, added to the extra pool
    pub freed_minimums: Decimal,
}

impl SimulationState {
    /// Initialize from the caller's debts, normalizing balances to cents
    pub fn from_debts(debts: &[Debt]) -> Self {
        let mut state = Self {
            month_index: 0,
            balances: BTreeMap::new(),
            cumulative_interest: BTreeMap::new(),
            payoff_month: BTreeMap::new(),
            freed_minimums: ZERO_CENTS,
        };

        for debt in debts {
            let balance = round_cents(debt.balance);
            state.balances.insert(debt.id, balance);
            state.cumulative_interest.insert(debt.id, ZERO_CENTS);
            // Already settled debts are out of the simulation; their minimum never frees up
            if balance.is_zero() {
                state.payoff_month.insert(debt.id, 0);
            }
        }

        state
    }

    pub fn balance(&self, id: DebtId) -> Decimal {
        self.balances.get(&id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_active(&self, id: DebtId) -> bool {
        self.balance(id) > Decimal::ZERO
    }

    /// Every balance has reached zero
    pub fn all_paid(&self) -> bool {
        self.balances.values().all(|b| b.is_zero())
    }

    /// Total still owed across all debts
    pub fn total_balance(&self) -> Decimal {
        sum_cents(self.balances.values().copied())
    }

    /// Add a month's interest to the balance and the running total
    pub fn accrue_interest(&mut self, id: DebtId, interest: Decimal) {
        if let Some(balance) = self.balances.get_mut(&id) {
            *balance = balance.saturating_add(interest);
        }
        let total = self.cumulative_interest.entry(id).or_insert(ZERO_CENTS);
        *total = total.saturating_add(interest);
    }

    /// Pay up to `amount` toward `id`, returning what was actually applied
    pub fn apply_payment(&mut self, id: DebtId, amount: Decimal) -> Decimal {
        let Some(balance) = self.balances.get_mut(&id) else {
            return Decimal::ZERO;
        };
        let applied = amount.min(*balance).max(Decimal::ZERO);
        *balance -= applied;
        applied
    }

    /// Record a payoff if `id` just reached zero; returns true on the first payoff only
    pub fn mark_if_paid_off(&mut self, id: DebtId, minimum_payment: Decimal) -> bool {
        if self.is_active(id) || self.payoff_month.contains_key(&id) {
            return false;
        }
        self.payoff_month.insert(id, self.month_index);
        self.freed_minimums = self.freed_minimums.saturating_add(minimum_payment);
        true
    }

    /// Total interest charged across all debts
    pub fn total_interest(&self) -> Decimal {
        sum_cents(self.cumulative_interest.values().copied())
    }
}
