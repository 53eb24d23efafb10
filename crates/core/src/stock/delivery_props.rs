//! Property-based tests for the partial-delivery splitter.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::delivery::split_delivery;
use super::types::{LineStatus, StockLine};
use ltp_shared::types::{MaterialId, StockLineId, StockTicketId};

/// A consistent line plus a valid delivery quantity for it.
fn line_and_quantity_strategy() -> impl Strategy<Value = (StockLine, Decimal)> {
    (1i64..1_000_000)
        .prop_flat_map(|original| (Just(original), 0i64..original))
        .prop_flat_map(|(original, delivered)| {
            (
                Just(original),
                Just(delivered),
                1i64..=(original - delivered),
            )
        })
        .prop_map(|(original, delivered, quantity)| {
            let status = if delivered == 0 {
                LineStatus::Pending
            } else {
                LineStatus::PartiallyDelivered
            };
            let line = StockLine {
                id: StockLineId::new(),
                ticket_id: StockTicketId::new(),
                material_id: MaterialId::new(),
                material_name: "Material".to_string(),
                original: Decimal::new(original, 2),
                delivered: Decimal::new(delivered, 2),
                status,
            };
            (line, Decimal::new(quantity, 2))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Quantity is conserved: what got delivered now plus the remainder
    /// equals what was outstanding before.
    #[test]
    fn prop_quantity_conservation((line, quantity) in line_and_quantity_strategy()) {
        let split = split_delivery(&line, quantity).unwrap();

        let delivered_now = split.updated.delivered - line.delivered;
        let remainder_quantity = split
            .remainder
            .as_ref()
            .map_or(Decimal::ZERO, |r| r.original);

        prop_assert_eq!(delivered_now, quantity);
        prop_assert_eq!(delivered_now + remainder_quantity, line.outstanding());
    }

    /// The updated line keeps its requested quantity and identity.
    #[test]
    fn prop_updated_line_identity((line, quantity) in line_and_quantity_strategy()) {
        let split = split_delivery(&line, quantity).unwrap();

        prop_assert_eq!(split.updated.id, line.id);
        prop_assert_eq!(split.updated.ticket_id, line.ticket_id);
        prop_assert_eq!(split.updated.original, line.original);
        prop_assert!(split.updated.delivered <= split.updated.original);
    }

    /// A remainder exists exactly when the delivery is partial, and it is
    /// always a fresh pending line.
    #[test]
    fn prop_remainder_iff_partial((line, quantity) in line_and_quantity_strategy()) {
        let split = split_delivery(&line, quantity).unwrap();

        prop_assert_eq!(split.remainder.is_some(), quantity < line.outstanding());
        if let Some(remainder) = &split.remainder {
            prop_assert_eq!(remainder.status, LineStatus::Pending);
            prop_assert_eq!(remainder.delivered, Decimal::ZERO);
            prop_assert!(remainder.original > Decimal::ZERO);
            prop_assert_ne!(remainder.id, line.id);
        }
    }

    /// Status follows the delivered quantity and never moves backwards.
    #[test]
    fn prop_status_is_monotonic((line, quantity) in line_and_quantity_strategy()) {
        let split = split_delivery(&line, quantity).unwrap();

        let expected = if split.updated.delivered == split.updated.original {
            LineStatus::Delivered
        } else {
            LineStatus::PartiallyDelivered
        };
        prop_assert_eq!(split.updated.status, expected);
        prop_assert!(line.status.can_transition_to(split.updated.status));
    }

    /// Quantities outside (0, outstanding] are always rejected.
    #[test]
    fn prop_out_of_range_rejected((line, _quantity) in line_and_quantity_strategy()) {
        prop_assert!(split_delivery(&line, Decimal::ZERO).is_err());
        prop_assert!(split_delivery(&line, Decimal::NEGATIVE_ONE).is_err());

        let over = line.outstanding() + Decimal::new(1, 2);
        prop_assert!(split_delivery(&line, over).is_err());
    }
}
