//! Stock ticket domain logic.
//!
//! This module implements delivery handling for stock movement lines:
//! - Line status transitions (pending, partially delivered, delivered)
//! - Partial-delivery splitting with quantity conservation
//! - Error types for delivery operations

pub mod delivery;
pub mod error;
pub mod types;

#[cfg(test)]
mod delivery_props;

pub use delivery::split_delivery;
pub use error::StockError;
pub use types::{DeliverySplit, LineStatus, StockLine};
