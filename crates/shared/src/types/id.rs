//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `ContractId` where a
//! `LotId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(ClientId, "Unique identifier for a client.");
typed_id!(ProjectId, "Unique identifier for a development project.");
typed_id!(LotId, "Unique identifier for a lot.");
typed_id!(ContractId, "Unique identifier for a sale contract.");
typed_id!(ServiceId, "Unique identifier for a catalog service.");
typed_id!(
    ContractedServiceId,
    "Unique identifier for a service sold with a contract."
);
typed_id!(LoanId, "Unique identifier for a loan.");
typed_id!(LoanInstallmentId, "Unique identifier for a loan installment.");
typed_id!(PaymentId, "Unique identifier for a recorded payment.");
typed_id!(MaterialId, "Unique identifier for a stock material.");
typed_id!(StockTicketId, "Unique identifier for a stock ticket.");
typed_id!(StockLineId, "Unique identifier for a stock movement line.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_creation() {
        let id = ContractId::new();
        assert!(!id.to_string().is_empty());
    }

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = ContractId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_typed_id_default() {
        let id = StockLineId::default();
        assert!(!id.to_string().is_empty());
    }

    #[test]
    fn test_typed_id_display() {
        let uuid = Uuid::new_v4();
        let id = LotId::from_uuid(uuid);
        assert_eq!(format!("{id}"), uuid.to_string());
    }

    #[test]
    fn test_typed_id_from_str() {
        let uuid = Uuid::new_v4();
        let id = PaymentId::from_str(&uuid.to_string()).unwrap();
        assert_eq!(id.into_inner(), uuid);
    }

    #[test]
    fn test_typed_id_from_str_error() {
        assert!(ContractId::from_str("invalid").is_err());
    }

    #[test]
    fn test_typed_ids_are_ordered_by_time() {
        let a = StockLineId::new();
        let b = StockLineId::new();
        assert_ne!(a, b);
    }
}
