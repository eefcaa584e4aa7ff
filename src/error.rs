//! Error types for ledgerbook
//!
//! Every fallible operation in the library returns [`BookResult`]. Rejections
//! (validation, unbalanced vouchers, bad accounts, bad date ranges) leave the
//! book untouched; storage failures propagate as-is.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Money;

/// The main error type for ledgerbook operations
#[derive(Error, Debug)]
pub enum BookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Bad account level, missing or wrong-level parent, malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Voucher debits and credits differ, or both are zero
    #[error("Unbalanced voucher: total debit {debit} must equal total credit {credit} and be greater than zero")]
    UnbalancedVoucher { debit: Money, credit: Money },

    /// A voucher entry targets a missing or non-leaf account
    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    /// Report period starts after it ends
    #[error("Invalid date range: from {from} is after to {to}")]
    InvalidDateRange { from: NaiveDate, to: NaiveDate },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Persistence failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export/import errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BookError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for vouchers
    pub fn voucher_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Voucher",
            identifier: identifier.into(),
        }
    }

    /// An amount or total too large to represent
    pub fn amount_overflow(what: &str) -> Self {
        Self::Validation(format!("{} exceeds the largest supported amount", what))
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error rejected a request without touching storage
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::UnbalancedVoucher { .. }
                | Self::InvalidAccount(_)
                | Self::InvalidDateRange { .. }
        )
    }
}

impl From<std::io::Error> for BookError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for BookError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for ledgerbook operations
pub type BookResult<T> = Result<T, BookError>;
