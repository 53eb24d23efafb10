//! `SeaORM` entity definitions.

pub mod clients;
pub mod contracted_services;
pub mod contracts;
pub mod loan_installments;
pub mod loans;
pub mod lots;
pub mod materials;
pub mod payments;
pub mod projects;
pub mod services;
pub mod stock_lines;
pub mod stock_tickets;
