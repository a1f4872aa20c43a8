//! Debt Payoff - Deterministic payoff projection engine for consumer debts
//!
//! This library provides:
//! - Avalanche and snowball payoff ordering
//! - Month-by-month amortization with minimum payment rollover
//! - Per-debt payoff dates and chart-ready monthly projections
//! - Scenario comparisons (extra payment, strategy) and portfolio summaries

pub mod config;
pub mod debt;
pub mod error;
pub mod payoff;
pub mod scenario;
pub mod service;
pub mod summary;

// Re-export commonly used types
pub use config::PayoffConfig;
pub use debt::{load_debts, Debt, DebtId, DebtType};
pub use error::{PayoffError, PayoffResult};
pub use payoff::{PayoffEngine, PayoffPlan, Projection, Strategy, YearMonth};
pub use scenario::{Scenario, ScenarioRunner};
pub use service::{DebtRepository, InMemoryDebtRepository, PayoffService};
pub use summary::DebtSummary;
