//! Read-only ledger entities and the query surface the insight engine
//! consumes. All writes happen in the external CRUD layer.

pub mod account;
pub mod budget;
pub mod goal;
pub mod memory;
pub mod project;
pub mod store;
pub mod transaction;

pub use account::Account;
pub use budget::Budget;
pub use goal::{GoalStatus, SavingsGoal};
pub use memory::MemoryLedger;
pub use project::{PipelineStage, Project};
pub use store::{DateRange, LedgerStore, Scope};
pub use transaction::{Direction, Transaction};
