//! Partial-delivery splitting.
//!
//! Applying a delivery to a line is pure computation over the two resulting
//! records; persisting them atomically is the repository's job.

use rust_decimal::Decimal;

use super::error::StockError;
use super::types::{DeliverySplit, LineStatus, StockLine};
use ltp_shared::types::StockLineId;

/// Applies a delivery of `quantity` to `line`.
///
/// The returned `updated` line has the quantity added to its delivered
/// total; when the delivery does not exhaust the outstanding quantity, a new
/// pending `remainder` line is created for the rest, copying the material
/// fields of the source line. Quantity is conserved: delivered-now plus the
/// remainder equals what was outstanding.
///
/// # Errors
///
/// Returns [`StockError::InvalidDeliveryQuantity`] when `quantity` is not
/// positive or exceeds the outstanding quantity, and
/// [`StockError::QuantityOutOfBounds`] when the line itself violates
/// `0 <= delivered <= original`.
pub fn split_delivery(line: &StockLine, quantity: Decimal) -> Result<DeliverySplit, StockError> {
    if line.delivered < Decimal::ZERO || line.delivered > line.original {
        return Err(StockError::QuantityOutOfBounds {
            delivered: line.delivered,
            original: line.original,
        });
    }

    let outstanding = line.outstanding();
    if quantity <= Decimal::ZERO || quantity > outstanding {
        return Err(StockError::InvalidDeliveryQuantity {
            requested: quantity,
            outstanding,
        });
    }

    let mut updated = line.clone();
    updated.delivered += quantity;
    updated.status = if updated.delivered == updated.original {
        LineStatus::Delivered
    } else {
        LineStatus::PartiallyDelivered
    };

    let remainder = (quantity < outstanding).then(|| StockLine {
        id: StockLineId::new(),
        ticket_id: line.ticket_id,
        material_id: line.material_id,
        material_name: line.material_name.clone(),
        original: outstanding - quantity,
        delivered: Decimal::ZERO,
        status: LineStatus::Pending,
    });

    Ok(DeliverySplit { updated, remainder })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltp_shared::types::{MaterialId, StockTicketId};
    use rust_decimal_macros::dec;

    fn make_line(original: Decimal, delivered: Decimal, status: LineStatus) -> StockLine {
        StockLine {
            id: StockLineId::new(),
            ticket_id: StockTicketId::new(),
            material_id: MaterialId::new(),
            material_name: "Cemento Portland".to_string(),
            original,
            delivered,
            status,
        }
    }

    #[test]
    fn test_partial_delivery_splits_line() {
        let line = make_line(dec!(10), dec!(0), LineStatus::Pending);
        let split = split_delivery(&line, dec!(6)).unwrap();

        assert_eq!(split.updated.delivered, dec!(6));
        assert_eq!(split.updated.original, dec!(10));
        assert_eq!(split.updated.status, LineStatus::PartiallyDelivered);

        let remainder = split.remainder.unwrap();
        assert_eq!(remainder.original, dec!(4));
        assert_eq!(remainder.delivered, dec!(0));
        assert_eq!(remainder.status, LineStatus::Pending);
        assert_eq!(remainder.ticket_id, line.ticket_id);
        assert_eq!(remainder.material_id, line.material_id);
        assert_eq!(remainder.material_name, line.material_name);
        assert_ne!(remainder.id, line.id);
    }

    #[test]
    fn test_full_delivery_leaves_no_remainder() {
        let line = make_line(dec!(10), dec!(0), LineStatus::Pending);
        let split = split_delivery(&line, dec!(10)).unwrap();

        assert_eq!(split.updated.delivered, dec!(10));
        assert_eq!(split.updated.status, LineStatus::Delivered);
        assert!(split.remainder.is_none());
    }

    #[test]
    fn test_delivery_on_partially_delivered_line() {
        let line = make_line(dec!(10), dec!(4), LineStatus::PartiallyDelivered);
        let split = split_delivery(&line, dec!(2)).unwrap();

        assert_eq!(split.updated.delivered, dec!(6));
        assert_eq!(split.updated.status, LineStatus::PartiallyDelivered);
        assert_eq!(split.remainder.unwrap().original, dec!(4));
    }

    #[test]
    fn test_exhausting_outstanding_completes_line() {
        let line = make_line(dec!(10), dec!(4), LineStatus::PartiallyDelivered);
        let split = split_delivery(&line, dec!(6)).unwrap();

        assert_eq!(split.updated.delivered, dec!(10));
        assert_eq!(split.updated.status, LineStatus::Delivered);
        assert!(split.remainder.is_none());
    }

    #[test]
    fn test_fractional_quantities() {
        let line = make_line(dec!(2.5), dec!(0), LineStatus::Pending);
        let split = split_delivery(&line, dec!(1.25)).unwrap();

        assert_eq!(split.updated.delivered, dec!(1.25));
        assert_eq!(split.remainder.unwrap().original, dec!(1.25));
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let line = make_line(dec!(10), dec!(0), LineStatus::Pending);
        let err = split_delivery(&line, dec!(0)).unwrap_err();
        assert!(matches!(err, StockError::InvalidDeliveryQuantity { .. }));
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let line = make_line(dec!(10), dec!(0), LineStatus::Pending);
        let err = split_delivery(&line, dec!(-3)).unwrap_err();
        assert!(matches!(err, StockError::InvalidDeliveryQuantity { .. }));
    }

    #[test]
    fn test_over_outstanding_is_rejected() {
        let line = make_line(dec!(10), dec!(4), LineStatus::PartiallyDelivered);
        let err = split_delivery(&line, dec!(7)).unwrap_err();
        assert!(matches!(
            err,
            StockError::InvalidDeliveryQuantity {
                outstanding,
                ..
            } if outstanding == dec!(6)
        ));
    }

    #[test]
    fn test_fully_delivered_line_accepts_nothing() {
        let line = make_line(dec!(10), dec!(10), LineStatus::Delivered);
        let err = split_delivery(&line, dec!(1)).unwrap_err();
        assert!(matches!(err, StockError::InvalidDeliveryQuantity { .. }));
    }

    #[test]
    fn test_inconsistent_line_is_rejected() {
        let line = make_line(dec!(10), dec!(12), LineStatus::PartiallyDelivered);
        let err = split_delivery(&line, dec!(1)).unwrap_err();
        assert!(matches!(err, StockError::QuantityOutOfBounds { .. }));
    }
}
