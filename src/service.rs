//! Payoff service: loads an owner's debts and runs projections against them

use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::config::PayoffConfig;
use crate::debt::{validate_debts, Debt};
use crate::error::PayoffResult;
use crate::payoff::{Clock, PayoffPlan, Strategy};
use crate::scenario::{Scenario, ScenarioRunner};
use crate::summary::DebtSummary;

/// Source of debts for an owner
pub trait DebtRepository: Send + Sync {
    /// All debts for `owner`; an unknown owner has none
    fn list_debts(&self, owner: &str) -> PayoffResult<Vec<Debt>>;
}

/// Debts held in memory, keyed by owner
#[derive(Debug, Clone, Default)]
pub struct InMemoryDebtRepository {
    debts: HashMap<String, Vec<Debt>>,
}

impl InMemoryDebtRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debts(mut self, owner: impl Into<String>, debts: Vec<Debt>) -> Self {
        self.insert(owner, debts);
        self
    }

    /// Replace the debt list for `owner`
    pub fn insert(&mut self, owner: impl Into<String>, debts: Vec<Debt>) {
        self.debts.insert(owner.into(), debts);
    }
}

impl DebtRepository for InMemoryDebtRepository {
    fn list_debts(&self, owner: &str) -> PayoffResult<Vec<Debt>> {
        Ok(self.debts.get(owner).cloned().unwrap_or_default())
    }
}

/// Repository + clock + engine
pub struct PayoffService<R: DebtRepository, C: Clock> {
    repository: R,
    clock: C,
    config: PayoffConfig,
}

impl<R: DebtRepository, C: Clock> PayoffService<R, C> {
    pub fn new(repository: R, clock: C) -> Self {
        Self {
            repository,
            clock,
            config: PayoffConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PayoffConfig) -> Self {
        self.config = config;
        self
    }

    fn runner(&self) -> ScenarioRunner {
        ScenarioRunner::new(self.config.clone(), self.clock.current_month())
    }

    /// Project the owner's debts under the named strategy
    ///
    /// The strategy name and inputs are checked before any simulation runs.
    pub fn payoff_plan(&self, owner: &str, strategy: &str, extra_payment: Decimal) -> PayoffResult<PayoffPlan> {
        let strategy: Strategy = strategy.parse()?;
        let debts = self.repository.list_debts(owner)?;
        validate_debts(&debts, extra_payment)?;

        debug!(
            "Projecting {} debts for {} ({}, extra {})",
            debts.len(),
            owner,
            strategy,
            extra_payment
        );
        self.runner().run(&debts, Scenario::new(strategy, extra_payment))
    }

    pub fn summary(&self, owner: &str) -> PayoffResult<DebtSummary> {
        let debts = self.repository.list_debts(owner)?;
        DebtSummary::compute(&self.runner(), &debts)
    }
}
