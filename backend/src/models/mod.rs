//! Domain models for the transaction generator

pub mod event;
pub mod transaction;

// Re-exports
pub use event::TimedEvent;
pub use transaction::{Cents, EntryType, Label, TransactionRecord};
