//! Error types for the payoff engine

use thiserror::Error;

use crate::debt::DebtId;

/// Failures detected before a simulation starts
///
/// Running out of months is not an error; it is reported through null
/// payoff fields on the projection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayoffError {
    #[error("{}", describe_invalid_input(*debt_id, reason))]
    InvalidInput {
        debt_id: Option<DebtId>,
        reason: String,
    },

    #[error("Invalid strategy '{0}': expected 'avalanche' or 'snowball'")]
    InvalidStrategy(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl PayoffError {
    /// Invalid input tied to a specific debt
    pub fn invalid_debt(debt_id: DebtId, reason: impl Into<String>) -> Self {
        PayoffError::InvalidInput {
            debt_id: Some(debt_id),
            reason: reason.into(),
        }
    }

    /// Invalid input not tied to a single debt (e.g. the extra payment)
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        PayoffError::InvalidInput {
            debt_id: None,
            reason: reason.into(),
        }
    }

    /// Whether the caller sent something malformed (as opposed to a backend failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PayoffError::InvalidInput { .. } | PayoffError::InvalidStrategy(_)
        )
    }
}

fn describe_invalid_input(debt_id: Option<DebtId>, reason: &str) -> String {
    match debt_id {
        Some(id) => format!("Invalid input for debt {}: {}", id, reason),
        None => format!("Invalid input: {}", reason),
    }
}

/// Result alias used throughout the library
pub type PayoffResult<T> = Result<T, PayoffError>;
