//! Stock movement domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use ltp_shared::types::{MaterialId, StockLineId, StockTicketId};

/// Fulfilment status of a stock movement line.
///
/// Transitions are monotonic: PENDING → PARTIALLY_DELIVERED → DELIVERED,
/// never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineStatus {
    /// Nothing has been delivered yet.
    Pending,
    /// Part of the requested quantity has been delivered.
    PartiallyDelivered,
    /// The full requested quantity has been delivered.
    Delivered,
}

impl LineStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::PartiallyDelivered => "PARTIALLY_DELIVERED",
            Self::Delivered => "DELIVERED",
        }
    }

    /// Parses a status from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PENDING" => Some(Self::Pending),
            "PARTIALLY_DELIVERED" => Some(Self::PartiallyDelivered),
            "DELIVERED" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Returns true once no further deliveries are possible.
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Returns true if moving to `next` respects the monotonic lifecycle.
    #[must_use]
    pub fn can_transition_to(&self, next: Self) -> bool {
        self.rank() <= next.rank()
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::PartiallyDelivered => 1,
            Self::Delivered => 2,
        }
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One line of a delivery/receipt ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLine {
    /// Unique identifier.
    pub id: StockLineId,
    /// The ticket this line belongs to.
    pub ticket_id: StockTicketId,
    /// The material being moved.
    pub material_id: MaterialId,
    /// Material name, denormalized for display.
    pub material_name: String,
    /// Requested quantity.
    pub original: Decimal,
    /// Quantity delivered so far. Invariant: `0 <= delivered <= original`.
    pub delivered: Decimal,
    /// Current fulfilment status.
    pub status: LineStatus,
}

impl StockLine {
    /// Quantity still awaiting delivery.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.original - self.delivered
    }
}

/// Result of applying a delivery to a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliverySplit {
    /// The line with the delivered quantity applied.
    pub updated: StockLine,
    /// A new pending line carrying the remainder, for partial deliveries.
    pub remainder: Option<StockLine>,
}
