//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod contract;
pub mod stock;

pub use contract::{
    ContractRepoError, ContractRepository, CreateContractInput, StatementInputs,
    UpdateContractInput,
};
pub use stock::{StockRepoError, StockRepository, TicketWithLines};
