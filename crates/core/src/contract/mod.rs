//! Contract domain logic.
//!
//! This module implements the financial core of a sale contract:
//! - Installment schedule derivation and payment cycles
//! - The unified account statement (debits, credits, running balance)
//! - Alert classification for overdue and due-soon entries
//! - Error types for contract operations

pub mod error;
pub mod ledger;
pub mod schedule;
pub mod types;

#[cfg(test)]
mod ledger_props;
#[cfg(test)]
mod schedule_props;

pub use error::ContractError;
pub use ledger::{
    AlertLevel, StatementEntry, StatementKind, StatementTotals, build_statement, statement_totals,
};
pub use schedule::{CYCLE_SIZE, build_schedule};
pub use types::{
    Contract, ContractStatus, ContractedServiceCharge, Cycle, CycleStatus, Installment,
    InstallmentStatus, Loan, LoanInstallment, PaymentCategory, PaymentRecord, Schedule,
    ScheduleEntry, ScheduleEntryKind,
};
