//! Debt payoff projection: ranking, amortization and aggregation

mod aggregate;
mod calendar;
mod engine;
mod money;
mod snapshot;
mod state;
mod strategy;

pub use aggregate::{aggregate, DebtPayoffDetail, MonthlyBalance, MonthlyProjection, PayoffPlan, Projection};
pub use calendar::{Clock, FixedClock, SystemClock, YearMonth};
pub use engine::PayoffEngine;
pub use money::{monthly_interest, round_cents, sum_cents, ZERO_CENTS};
pub use snapshot::{MonthSnapshot, SimulationHistory};
pub use state::SimulationState;
pub use strategy::{rank, rank_by_name, Strategy};
