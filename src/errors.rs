//! Unified error types for the payday planner.
//!
//! Every fallible function in the crate returns [`Result`], so callers can
//! propagate with `?` regardless of whether the failure came from validation,
//! configuration, or the database.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while planning or completing a payday
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed, or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// Budget inputs are out of range (percentages, paycheck, bills)
    #[error("Invalid budget configuration: {reason}")]
    InvalidBudgetConfiguration {
        /// Which input was rejected and why
        reason: String,
    },

    /// A money amount was rejected (negative or not representable)
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// A stored frequency string is not recognised
    #[error("Unknown frequency: {value}")]
    InvalidFrequency {
        /// The unrecognised value
        value: String,
    },

    /// Income record not found
    #[error("Income not found: {id}")]
    IncomeNotFound {
        /// Primary key that was looked up
        id: i64,
    },

    /// Bill record not found
    #[error("Bill not found: {id}")]
    BillNotFound {
        /// Primary key that was looked up
        id: i64,
    },

    /// One-time deposit not found
    #[error("Deposit not found: {id}")]
    DepositNotFound {
        /// Primary key that was looked up
        id: i64,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidBudgetConfiguration`].
    pub fn invalid_budget(reason: impl Into<String>) -> Self {
        Self::InvalidBudgetConfiguration {
            reason: reason.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
