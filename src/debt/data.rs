//! Debt records as supplied by the caller

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{PayoffError, PayoffResult};

/// Opaque debt identifier, unique within one request
pub type DebtId = u32;

/// Upper bound for an annual percentage rate
const MAX_INTEREST_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Kind of debt (informational only, does not affect the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtType {
    CreditCard,
    Loan,
    LineOfCredit,
    Mortgage,
    StudentLoan,
    #[default]
    Other,
}

impl DebtType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebtType::CreditCard => "credit_card",
            DebtType::Loan => "loan",
            DebtType::LineOfCredit => "line_of_credit",
            DebtType::Mortgage => "mortgage",
            DebtType::StudentLoan => "student_loan",
            DebtType::Other => "other",
        }
    }
}

impl fmt::Display for DebtType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DebtType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "credit_card" => Ok(DebtType::CreditCard),
            "loan" => Ok(DebtType::Loan),
            "line_of_credit" => Ok(DebtType::LineOfCredit),
            "mortgage" => Ok(DebtType::Mortgage),
            "student_loan" => Ok(DebtType::StudentLoan),
            "other" | "" => Ok(DebtType::Other),
            other => Err(format!("Unknown debt type: {}", other)),
        }
    }
}

/// A single debt as it stands today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Unique identifier
    pub id: DebtId,

    /// Display label, e.g. "TD Visa"
    pub name: String,

    #[serde(default)]
    pub debt_type: DebtType,

    /// Current principal owed
    pub balance: Decimal,

    /// Annual percentage rate, 0-100
    pub interest_rate: Decimal,

    /// Paid every month until the balance reaches zero
    pub minimum_payment: Decimal,
}

impl Debt {
    pub fn new(
        id: DebtId,
        name: impl Into<String>,
        balance: Decimal,
        interest_rate: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            debt_type: DebtType::Other,
            balance,
            interest_rate,
            minimum_payment,
        }
    }

    pub fn with_type(mut self, debt_type: DebtType) -> Self {
        self.debt_type = debt_type;
        self
    }

    /// Monthly periodic rate as a fraction (APR / 100 / 12)
    pub fn monthly_rate(&self) -> Decimal {
        self.interest_rate / Decimal::from(1200)
    }

    /// Check field ranges
    pub fn validate(&self) -> PayoffResult<()> {
        if self.balance < Decimal::ZERO {
            return Err(PayoffError::invalid_debt(self.id, "balance must be non-negative"));
        }
        if self.minimum_payment < Decimal::ZERO {
            return Err(PayoffError::invalid_debt(
                self.id,
                "minimum payment must be non-negative",
            ));
        }
        if self.interest_rate < Decimal::ZERO || self.interest_rate > MAX_INTEREST_RATE {
            return Err(PayoffError::invalid_debt(
                self.id,
                format!("interest rate {} is outside [0, 100]", self.interest_rate),
            ));
        }
        Ok(())
    }
}

/// Validate a full request: every debt, id uniqueness, and the extra payment
pub fn validate_debts(debts: &[Debt], extra_payment: Decimal) -> PayoffResult<()> {
    if extra_payment < Decimal::ZERO {
        return Err(PayoffError::invalid_request(format!(
            "extra payment {} must be non-negative",
            extra_payment
        )));
    }

    let mut seen = HashSet::with_capacity(debts.len());
    for debt in debts {
        debt.validate()?;
        if !seen.insert(debt.id) {
            return Err(PayoffError::invalid_debt(debt.id, "duplicate debt id"));
        }
    }

    Ok(())
}
