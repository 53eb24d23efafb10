//! Error types for contract operations.

use rust_decimal::Decimal;
use thiserror::Error;

use ltp_shared::AppError;

/// Errors that can occur while deriving a contract's schedule or statement.
#[derive(Debug, Error)]
pub enum ContractError {
    /// A contract with installments must have a start date.
    #[error("Contract has {installment_count} installments but no start date")]
    MissingStartDate {
        /// Number of installments the contract declares.
        installment_count: u32,
    },

    /// Monetary contract terms must not be negative.
    #[error("Contract term `{field}` must not be negative (got {amount})")]
    NegativeAmount {
        /// Name of the offending field.
        field: &'static str,
        /// The negative value found.
        amount: Decimal,
    },

    /// An installment due date fell outside the supported calendar range.
    #[error("Due date for installment {sequence} is out of range")]
    DueDateOutOfRange {
        /// 1-based installment sequence number.
        sequence: u32,
    },
}

impl ContractError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingStartDate { .. } => "MISSING_START_DATE",
            Self::NegativeAmount { .. } => "NEGATIVE_CONTRACT_TERM",
            Self::DueDateOutOfRange { .. } => "DUE_DATE_OUT_OF_RANGE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NegativeAmount { .. } => 400,
            Self::MissingStartDate { .. } | Self::DueDateOutOfRange { .. } => 422,
        }
    }
}

impl From<ContractError> for AppError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::NegativeAmount { .. } => Self::Validation(err.to_string()),
            ContractError::MissingStartDate { .. } | ContractError::DueDateOutOfRange { .. } => {
                Self::BusinessRule(err.to_string())
            }
        }
    }
}
