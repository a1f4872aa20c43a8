//! Core amortization loop for monthly debt payoff projections

use log::debug;
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::config::PayoffConfig;
use crate::debt::{validate_debts, Debt, DebtId};
use crate::error::{PayoffError, PayoffResult};
use super::aggregate::{aggregate, Projection};
use super::calendar::YearMonth;
use super::money::{monthly_interest, round_cents};
use super::snapshot::{MonthSnapshot, SimulationHistory};
use super::state::SimulationState;
use super::strategy::{rank, Strategy};

/// Main payoff engine
#[derive(Debug, Clone, Default)]
pub struct PayoffEngine {
    config: PayoffConfig,
}

impl PayoffEngine {
    pub fn new(config: PayoffConfig) -> Self {
        Self { config }
    }

    /// Rank, simulate and aggregate in one call
    pub fn project(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        extra_payment: Decimal,
        start: YearMonth,
    ) -> PayoffResult<Projection> {
        let ranking = rank(debts, strategy);
        let history = self.simulate(debts, &ranking, extra_payment)?;
        Ok(aggregate(&history, &ranking, debts, start))
    }

    /// Run the month-by-month simulation
    ///
    /// Each month: accrue interest on every open debt, pay every minimum,
    /// then pour the extra pool (extra payment plus minimums freed by debts
    /// paid off in earlier months) down `ranking` until it runs dry.
    pub fn simulate(
        &self,
        debts: &[Debt],
        ranking: &[DebtId],
        extra_payment: Decimal,
    ) -> PayoffResult<SimulationHistory> {
        validate_debts(debts, extra_payment)?;
        validate_ranking(debts, ranking)?;

        let debts: Vec<Debt> = debts.iter().map(normalize).collect();
        let extra_payment = round_cents(extra_payment);

        let mut state = SimulationState::from_debts(&debts);
        let mut snapshots = Vec::new();

        while !state.all_paid() && state.month_index < self.config.max_months {
            state.month_index += 1;
            let snapshot = self.simulate_month(&debts, ranking, extra_payment, &mut state);
            snapshots.push(snapshot);
        }

        let cap_reached = !state.all_paid();
        if cap_reached {
            debug!(
                "Stopped at {} month cap with {} still owed",
                self.config.max_months,
                state.total_balance()
            );
        }

        Ok(SimulationHistory {
            extra_payment,
            snapshots,
            final_state: state,
            cap_reached,
        })
    }

    /// Advance every debt by one month
    fn simulate_month(
        &self,
        debts: &[Debt],
        ranking: &[DebtId],
        extra_payment: Decimal,
        state: &mut SimulationState,
    ) -> MonthSnapshot {
        let mut snapshot = MonthSnapshot::new(state.month_index);

        // Minimums freed this month only join the pool next month
        snapshot.extra_pool = extra_payment.saturating_add(state.freed_minimums);

        self.accrue_interest(debts, state, &mut snapshot);
        self.pay_minimums(debts, state, &mut snapshot);
        self.allocate_extra(debts, ranking, state, &mut snapshot);

        snapshot.balances = state.balances.clone();
        snapshot
    }

    fn accrue_interest(&self, debts: &[Debt], state: &mut SimulationState, snapshot: &mut MonthSnapshot) {
        for debt in debts {
            if !state.is_active(debt.id) {
                continue;
            }
            let interest = monthly_interest(state.balance(debt.id), debt.monthly_rate());
            state.accrue_interest(debt.id, interest);
            snapshot.interest.insert(debt.id, interest);
        }
    }

    fn pay_minimums(&self, debts: &[Debt], state: &mut SimulationState, snapshot: &mut MonthSnapshot) {
        for debt in debts {
            if !state.is_active(debt.id) {
                continue;
            }
            let paid = state.apply_payment(debt.id, debt.minimum_payment);
            snapshot.record_payment(debt.id, paid);
            self.check_payoff(debt, state, snapshot);
        }
    }

    /// Waterfall the extra pool down the ranking within the month
    fn allocate_extra(
        &self,
        debts: &[Debt],
        ranking: &[DebtId],
        state: &mut SimulationState,
        snapshot: &mut MonthSnapshot,
    ) {
        let mut pool = snapshot.extra_pool;

        for id in ranking {
            if pool <= Decimal::ZERO {
                break;
            }
            if !state.is_active(*id) {
                continue;
            }
            let paid = state.apply_payment(*id, pool);
            pool -= paid;
            snapshot.record_payment(*id, paid);

            if let Some(debt) = debts.iter().find(|d| d.id == *id) {
                self.check_payoff(debt, state, snapshot);
            }
        }
    }

    fn check_payoff(&self, debt: &Debt, state: &mut SimulationState, snapshot: &mut MonthSnapshot) {
        if state.mark_if_paid_off(debt.id, debt.minimum_payment) {
            debug!(
                "Debt {} ({}) paid off in month {}, freeing {} per month",
                debt.id, debt.name, state.month_index, debt.minimum_payment
            );
            snapshot.paid_off.push(debt.id);
        }
    }
}

/// Round monetary fields to cents so every balance stays on a cent boundary
fn normalize(debt: &Debt) -> Debt {
    Debt {
        balance: round_cents(debt.balance),
        minimum_payment: round_cents(debt.minimum_payment),
        ..debt.clone()
    }
}

fn validate_ranking(debts: &[Debt], ranking: &[DebtId]) -> PayoffResult<()> {
    let known: HashSet<DebtId> = debts.iter().map(|d| d.id).collect();
    let mut seen = HashSet::with_capacity(ranking.len());

    for id in ranking {
        if !known.contains(id) {
            return Err(PayoffError::invalid_debt(*id, "ranking names an unknown debt"));
        }
        if !seen.insert(*id) {
            return Err(PayoffError::invalid_debt(*id, "ranking names a debt twice"));
        }
    }

    Ok(())
}
