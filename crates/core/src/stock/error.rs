//! Error types for stock delivery operations.

use rust_decimal::Decimal;
use thiserror::Error;

use ltp_shared::AppError;

/// Errors that can occur while applying deliveries to stock lines.
#[derive(Debug, Error)]
pub enum StockError {
    /// The delivered quantity must be positive and at most the outstanding
    /// quantity.
    #[error(
        "Invalid delivery quantity {requested}: must be positive and at most {outstanding}"
    )]
    InvalidDeliveryQuantity {
        /// The quantity the caller tried to deliver.
        requested: Decimal,
        /// The quantity still awaiting delivery.
        outstanding: Decimal,
    },

    /// The line's stored quantities violate `0 <= delivered <= original`.
    #[error("Stock line quantities are inconsistent: delivered {delivered} of {original}")]
    QuantityOutOfBounds {
        /// Quantity recorded as delivered.
        delivered: Decimal,
        /// Requested quantity of the line.
        original: Decimal,
    },
}

impl StockError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDeliveryQuantity { .. } => "INVALID_DELIVERY_QUANTITY",
            Self::QuantityOutOfBounds { .. } => "QUANTITY_OUT_OF_BOUNDS",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidDeliveryQuantity { .. } => 400,
            Self::QuantityOutOfBounds { .. } => 422,
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InvalidDeliveryQuantity { .. } => Self::Validation(err.to_string()),
            StockError::QuantityOutOfBounds { .. } => Self::BusinessRule(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes_and_status() {
        let err = StockError::InvalidDeliveryQuantity {
            requested: dec!(0),
            outstanding: dec!(10),
        };
        assert_eq!(err.error_code(), "INVALID_DELIVERY_QUANTITY");
        assert_eq!(err.http_status_code(), 400);

        let err = StockError::QuantityOutOfBounds {
            delivered: dec!(12),
            original: dec!(10),
        };
        assert_eq!(err.error_code(), "QUANTITY_OUT_OF_BOUNDS");
        assert_eq!(err.http_status_code(), 422);
    }

    #[test]
    fn test_error_display() {
        let err = StockError::InvalidDeliveryQuantity {
            requested: dec!(15),
            outstanding: dec!(6),
        };
        assert_eq!(
            err.to_string(),
            "Invalid delivery quantity 15: must be positive and at most 6"
        );
    }

    #[test]
    fn test_app_error_conversion() {
        let app: AppError = StockError::InvalidDeliveryQuantity {
            requested: dec!(0),
            outstanding: dec!(1),
        }
        .into();
        assert_eq!(app.status_code(), 400);
    }
}
