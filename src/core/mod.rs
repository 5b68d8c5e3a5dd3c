//! Business logic components
//!
//! - [`registry`] - In-memory account collection and number allocation
//! - [`engine`] - Operation orchestration and transfer consistency
//! - [`traits`] - Storage seam consumed by the engine

pub mod engine;
pub mod registry;
pub mod traits;

pub use engine::{AccountSummary, Operation, OperationEngine};
pub use registry::{AccountRegistry, CREDIT_SEQUENCE_START, SAVINGS_SEQUENCE_START};
pub use traits::LedgerStore;
