//! Projection output structures built from a simulation history

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::debt::{Debt, DebtId, DebtType};
use super::calendar::YearMonth;
use super::money::{round_cents, sum_cents, ZERO_CENTS};
use super::snapshot::SimulationHistory;
use super::strategy::Strategy;

/// A debt's balance at the end of one projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// 1-based month number from the start month
    pub month: u32,
    pub date: YearMonth,
    pub balance: Decimal,
}

/// Per-debt payoff result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffDetail {
    pub debt_id: DebtId,
    pub name: String,
    pub debt_type: DebtType,

    /// 1 = first to receive the extra pool
    pub order: u32,

    pub original_balance: Decimal,
    pub interest_rate: Decimal,
    pub minimum_payment: Decimal,

    /// None if not paid off within the month cap
    pub payoff_date: Option<YearMonth>,
    pub months_to_payoff: Option<u32>,

    pub total_interest: Decimal,
    pub total_paid: Decimal,

    pub monthly_balances: Vec<MonthlyBalance>,
}

/// Payments across all debts for one month, ready for charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProjection {
    pub month: u32,
    pub date: YearMonth,

    /// Debt name -> amount paid that month
    pub breakdown: BTreeMap<String, Decimal>,

    pub total_paid: Decimal,
    pub total_balance: Decimal,
}

/// Complete payoff projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub extra_payment: Decimal,

    /// Month the last debt reaches zero; None if the cap was hit
    pub debt_free_date: Option<YearMonth>,
    pub total_months: Option<u32>,

    pub total_interest_paid: Decimal,
    pub total_paid: Decimal,

    /// Debts in strategy order
    pub payoff_order: Vec<DebtPayoffDetail>,

    pub monthly_projection: Vec<MonthlyProjection>,
}

impl Projection {
    /// Every debt reached zero within the cap
    pub fn is_resolved(&self) -> bool {
        self.total_months.is_some()
    }

    pub fn detail(&self, debt_id: DebtId) -> Option<&DebtPayoffDetail> {
        self.payoff_order.iter().find(|d| d.debt_id == debt_id)
    }

    /// Debts that never reached zero
    pub fn unpaid(&self) -> impl Iterator<Item = &DebtPayoffDetail> {
        self.payoff_order.iter().filter(|d| d.months_to_payoff.is_none())
    }
}

/// A projection labelled with the strategy that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffPlan {
    pub strategy: Strategy,
    #[serde(flatten)]
    pub projection: Projection,
}

/// Package a simulation history into the output contract
///
/// Month offsets become calendar labels relative to `start` (month 1 is the
/// month after `start`). Debts missing from `ranking` follow the ranked ones
/// in input order.
pub fn aggregate(
    history: &SimulationHistory,
    ranking: &[DebtId],
    debts: &[Debt],
    start: YearMonth,
) -> Projection {
    let payoff_order: Vec<DebtPayoffDetail> = ordered_debts(ranking, debts)
        .into_iter()
        .enumerate()
        .map(|(index, debt)| debt_detail(history, debt, index as u32 + 1, start))
        .collect();

    let monthly_projection = history
        .snapshots
        .iter()
        .map(|snapshot| {
            let mut breakdown = BTreeMap::new();
            for debt in debts {
                // Debts sharing a display name share a bucket
                let paid = breakdown.entry(debt.name.clone()).or_insert(ZERO_CENTS);
                *paid = paid.saturating_add(snapshot.payment(debt.id));
            }
            MonthlyProjection {
                month: snapshot.month,
                date: start.plus_months(snapshot.month),
                breakdown,
                total_paid: snapshot.total_paid(),
                total_balance: snapshot.total_balance(),
            }
        })
        .collect();

    let total_interest_paid = sum_cents(payoff_order.iter().map(|d| d.total_interest));

    let total_months = if debts.is_empty() {
        None
    } else {
        payoff_order
            .iter()
            .map(|d| d.months_to_payoff)
            .collect::<Option<Vec<u32>>>()
            .map(|months| months.into_iter().max().unwrap_or(0))
    };

    Projection {
        extra_payment: history.extra_payment,
        debt_free_date: total_months.map(|m| start.plus_months(m)),
        total_months,
        total_interest_paid,
        total_paid: history.total_paid(),
        payoff_order,
        monthly_projection,
    }
}

fn ordered_debts<'a>(ranking: &[DebtId], debts: &'a [Debt]) -> Vec<&'a Debt> {
    let mut ordered: Vec<&Debt> = ranking
        .iter()
        .filter_map(|id| debts.iter().find(|d| d.id == *id))
        .collect();

    let ranked: HashSet<DebtId> = ordered.iter().map(|d| d.id).collect();
    ordered.extend(debts.iter().filter(|d| !ranked.contains(&d.id)));
    ordered
}

fn debt_detail(history: &SimulationHistory, debt: &Debt, order: u32, start: YearMonth) -> DebtPayoffDetail {
    let months_to_payoff = history.payoff_month(debt.id);

    let monthly_balances = history
        .snapshots
        .iter()
        .map(|snapshot| MonthlyBalance {
            month: snapshot.month,
            date: start.plus_months(snapshot.month),
            balance: snapshot.balance(debt.id),
        })
        .collect();

    DebtPayoffDetail {
        debt_id: debt.id,
        name: debt.name.clone(),
        debt_type: debt.debt_type,
        order,
        original_balance: round_cents(debt.balance),
        interest_rate: debt.interest_rate,
        minimum_payment: round_cents(debt.minimum_payment),
        payoff_date: months_to_payoff.map(|m| start.plus_months(m)),
        months_to_payoff,
        total_interest: history
            .final_state
            .cumulative_interest
            .get(&debt.id)
            .copied()
            .unwrap_or(ZERO_CENTS),
        total_paid: sum_cents(history.snapshots.iter().map(|s| s.payment(debt.id))),
        monthly_balances,
    }
}
