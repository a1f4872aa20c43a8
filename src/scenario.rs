//! Scenario runner for side-by-side payoff projections
//!
//! Runs the same debts under several strategies or extra payments, e.g. the
//! baseline-versus-extra comparison shown next to a payoff plan.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayoffConfig;
use crate::debt::{validate_debts, Debt};
use crate::error::PayoffResult;
use crate::payoff::{PayoffEngine, PayoffPlan, Projection, Strategy, YearMonth, ZERO_CENTS};

/// One strategy / extra payment combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub strategy: Strategy,
    pub extra_payment: Decimal,
}

impl Scenario {
    pub fn new(strategy: Strategy, extra_payment: Decimal) -> Self {
        Self { strategy, extra_payment }
    }
}

/// Baseline (no extra) against a plan with extra payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentComparison {
    pub baseline: PayoffPlan,
    pub with_extra: PayoffPlan,

    /// None when either side never pays off within the cap
    pub months_saved: Option<i64>,
    pub interest_saved: Decimal,
}

/// Avalanche against snowball for the same debts and extra payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: PayoffPlan,
    pub snowball: PayoffPlan,

    /// Snowball interest minus avalanche interest
    pub avalanche_interest_advantage: Decimal,
}

/// Scenario runner sharing one engine configuration and start month
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: PayoffEngine,
    start: YearMonth,
}

impl ScenarioRunner {
    pub fn new(config: PayoffConfig, start: YearMonth) -> Self {
        Self {
            engine: PayoffEngine::new(config),
            start,
        }
    }

    /// Run a single scenario
    pub fn run(&self, debts: &[Debt], scenario: Scenario) -> PayoffResult<PayoffPlan> {
        let projection = self
            .engine
            .project(debts, scenario.strategy, scenario.extra_payment, self.start)?;
        Ok(PayoffPlan {
            strategy: scenario.strategy,
            projection,
        })
    }

    /// Run many scenarios in parallel; results keep the input order
    pub fn run_scenarios(&self, debts: &[Debt], scenarios: &[Scenario]) -> PayoffResult<Vec<PayoffPlan>> {
        // Fail on the shared debt list once rather than per scenario
        validate_debts(debts, Decimal::ZERO)?;

        scenarios
            .par_iter()
            .map(|scenario| self.run(debts, *scenario))
            .collect()
    }

    /// One projection per extra payment amount for a fixed strategy
    pub fn sweep_extra_payments(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        extras: &[Decimal],
    ) -> PayoffResult<Vec<PayoffPlan>> {
        let scenarios: Vec<Scenario> = extras.iter().map(|e| Scenario::new(strategy, *e)).collect();
        self.run_scenarios(debts, &scenarios)
    }

    /// Compare a plan with extra payment against paying minimums only
    pub fn compare_extra_payment(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        extra_payment: Decimal,
    ) -> PayoffResult<ExtraPaymentComparison> {
        let (baseline, with_extra) = rayon::join(
            || self.run(debts, Scenario::new(strategy, Decimal::ZERO)),
            || self.run(debts, Scenario::new(strategy, extra_payment)),
        );
        let (baseline, with_extra) = (baseline?, with_extra?);

        let months_saved = months_between(&baseline.projection, &with_extra.projection);
        let interest_saved =
            baseline.projection.total_interest_paid - with_extra.projection.total_interest_paid;

        Ok(ExtraPaymentComparison {
            baseline,
            with_extra,
            months_saved,
            interest_saved,
        })
    }

    /// Compare both strategies with the same extra payment
    pub fn compare_strategies(&self, debts: &[Debt], extra_payment: Decimal) -> PayoffResult<StrategyComparison> {
        let (avalanche, snowball) = rayon::join(
            || self.run(debts, Scenario::new(Strategy::Avalanche, extra_payment)),
            || self.run(debts, Scenario::new(Strategy::Snowball, extra_payment)),
        );
        let (avalanche, snowball) = (avalanche?, snowball?);

        let avalanche_interest_advantage = ZERO_CENTS + snowball.projection.total_interest_paid
            - avalanche.projection.total_interest_paid;

        Ok(StrategyComparison {
            avalanche,
            snowball,
            avalanche_interest_advantage,
        })
    }
}

fn months_between(baseline: &Projection, faster: &Projection) -> Option<i64> {
    match (baseline.total_months, faster.total_months) {
        (Some(base), Some(fast)) => Some(base as i64 - fast as i64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PayoffError;
    use rust_decimal_macros::dec;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(PayoffConfig::default(), YearMonth::new(2026, 10).unwrap())
    }

    fn two_debts() -> Vec<Debt> {
        vec![
            Debt::new(1, "A", dec!(1000), dec!(20), dec!(50)),
            Debt::new(2, "B", dec!(500), dec!(10), dec!(50)),
        ]
    }

    #[test]
    fn test_run_scenarios_keeps_order() {
        let scenarios = [
            Scenario::new(Strategy::Snowball, dec!(100)),
            Scenario::new(Strategy::Avalanche, dec!(0)),
            Scenario::new(Strategy::Avalanche, dec!(100)),
        ];
        let plans = runner().run_scenarios(&two_debts(), &scenarios).unwrap();

        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].strategy, Strategy::Snowball);
        assert_eq!(plans[0].projection.total_interest_paid, dec!(105.32));
        assert_eq!(plans[1].projection.total_interest_paid, dec!(213.26));
        assert_eq!(plans[2].projection.total_interest_paid, dec!(91.65));
    }

    #[test]
    fn test_compare_extra_payment() {
        let comparison = runner()
            .compare_extra_payment(&two_debts(), Strategy::Avalanche, dec!(100))
            .unwrap();

        assert_eq!(comparison.baseline.projection.total_months, Some(18));
        assert_eq!(comparison.with_extra.projection.total_months, Some(9));
        assert_eq!(comparison.months_saved, Some(9));
        assert_eq!(comparison.interest_saved, dec!(121.61));
    }

    #[test]
    fn test_compare_strategies() {
        let comparison = runner().compare_strategies(&two_debts(), dec!(100)).unwrap();
        assert_eq!(comparison.avalanche.strategy, Strategy::Avalanche);
        assert_eq!(comparison.snowball.strategy, Strategy::Snowball);
        assert_eq!(comparison.avalanche_interest_advantage, dec!(13.67));
    }

    #[test]
    fn test_unresolved_baseline_has_no_months_saved() {
        let debts = vec![Debt::new(1, "Stuck", dec!(1000), dec!(12), dec!(10))];
        let comparison = runner()
            .compare_extra_payment(&debts, Strategy::Avalanche, dec!(100))
            .unwrap();
        assert_eq!(comparison.baseline.projection.total_months, None);
        assert!(comparison.with_extra.projection.is_resolved());
        assert_eq!(comparison.months_saved, None);
        assert!(comparison.interest_saved > Decimal::ZERO);
    }

    #[test]
    fn test_sweep_extra_payments() {
        let plans = runner()
            .sweep_extra_payments(&two_debts(), Strategy::Avalanche, &[dec!(0), dec!(100)])
            .unwrap();
        let months: Vec<Option<u32>> = plans.iter().map(|p| p.projection.total_months).collect();
        assert_eq!(months, vec![Some(18), Some(9)]);
    }

    #[test]
    fn test_invalid_debts_fail_the_batch() {
        let debts = vec![Debt::new(1, "Bad", dec!(-1), dec!(5), dec!(10))];
        let err = runner()
            .run_scenarios(&debts, &[Scenario::new(Strategy::Avalanche, dec!(0))])
            .unwrap_err();
        assert!(matches!(err, PayoffError::InvalidInput { .. }));

        let err = runner()
            .compare_extra_payment(&two_debts(), Strategy::Snowball, dec!(-5))
            .unwrap_err();
        assert!(matches!(err, PayoffError::InvalidInput { debt_id: None, .. }));
    }
}
