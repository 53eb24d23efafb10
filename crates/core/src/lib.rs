//! Core business logic for Lote Para Todos.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here. Time never
//! comes from the wall clock: every computation that depends on "today" takes
//! it as an explicit parameter.
//!
//! # Modules
//!
//! - `contract` - Installment schedules, payment cycles, and account statements
//! - `stock` - Delivery ticket lines and partial-delivery splitting
//! - `export` - Flat-file (CSV) statement export

pub mod contract;
pub mod export;
pub mod stock;
