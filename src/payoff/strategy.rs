//! Payoff strategies and priority ranking

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::debt::{Debt, DebtId};
use crate::error::PayoffError;

/// Which debt receives the extra payment pool first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Highest interest rate first
    #[default]
    Avalanche,
    /// Lowest balance first
    Snowball,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Avalanche, Strategy::Snowball];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
        }
    }

    /// Priority comparison between two debts; `Less` means `a` is paid first
    fn compare(&self, a: &Debt, b: &Debt) -> Ordering {
        match self {
            Strategy::Avalanche => b
                .interest_rate
                .cmp(&a.interest_rate)
                .then_with(|| a.balance.cmp(&b.balance))
                .then_with(|| a.id.cmp(&b.id)),
            Strategy::Snowball => a
                .balance
                .cmp(&b.balance)
                .then_with(|| b.interest_rate.cmp(&a.interest_rate))
                .then_with(|| a.id.cmp(&b.id)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            _ => Err(PayoffError::InvalidStrategy(s.to_string())),
        }
    }
}

/// Rank debts by strategy priority, returning ids in payment order
///
/// Ties are broken deterministically so the same input always yields the
/// same ranking regardless of input order.
pub fn rank(debts: &[Debt], strategy: Strategy) -> Vec<DebtId> {
    let mut ordered: Vec<&Debt> = debts.iter().collect();
    ordered.sort_by(|a, b| strategy.compare(a, b));
    ordered.into_iter().map(|d| d.id).collect()
}

/// Rank debts by a strategy given by name
pub fn rank_by_name(debts: &[Debt], strategy: &str) -> Result<Vec<DebtId>, PayoffError> {
    Ok(rank(debts, strategy.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn debts() -> Vec<Debt> {
        vec![
            Debt::new(1, "Car", dec!(8000), dec!(6.9), dec!(250)),
            Debt::new(2, "Visa", dec!(2500), dec!(19.99), dec!(75)),
            Debt::new(3, "Store", dec!(400), dec!(24.99), dec!(25)),
            Debt::new(4, "Student", dec!(400), dec!(4.5), dec!(100)),
        ]
    }

    #[test]
    fn test_avalanche_highest_rate_first() {
        assert_eq!(rank(&debts(), Strategy::Avalanche), vec![3, 2, 1, 4]);
    }

    #[test]
    fn test_snowball_lowest_balance_first() {
        // 3 and 4 tie on balance; higher rate wins
        assert_eq!(rank(&debts(), Strategy::Snowball), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_avalanche_rate_tie_breaks_on_balance_then_id() {
        let debts = vec![
            Debt::new(9, "B", dec!(500), dec!(18), dec!(10)),
            Debt::new(5, "A", dec!(500), dec!(18), dec!(10)),
            Debt::new(7, "C", dec!(200), dec!(18), dec!(10)),
        ];
        assert_eq!(rank(&debts, Strategy::Avalanche), vec![7, 5, 9]);
    }

    #[test]
    fn test_snowball_full_tie_breaks_on_id() {
        let debts = vec![
            Debt::new(2, "B", dec!(500), dec!(18), dec!(10)),
            Debt::new(1, "A", dec!(500), dec!(18), dec!(10)),
        ];
        assert_eq!(rank(&debts, Strategy::Snowball), vec![1, 2]);
    }

    #[test]
    fn test_ranking_ignores_input_order() {
        let mut reversed = debts();
        reversed.reverse();
        for strategy in Strategy::ALL {
            assert_eq!(rank(&reversed, strategy), rank(&debts(), strategy));
        }
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("avalanche".parse::<Strategy>(), Ok(Strategy::Avalanche));
        assert_eq!(" Snowball ".parse::<Strategy>(), Ok(Strategy::Snowball));
        assert_eq!(
            "fastest".parse::<Strategy>(),
            Err(PayoffError::InvalidStrategy("fastest".into()))
        );
    }

    #[test]
    fn test_rank_by_name_rejects_unknown() {
        assert!(matches!(
            rank_by_name(&debts(), "highest-balance"),
            Err(PayoffError::InvalidStrategy(_))
        ));
        assert_eq!(rank_by_name(&debts(), "snowball").unwrap(), vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(&[], Strategy::Avalanche).is_empty());
    }
}
