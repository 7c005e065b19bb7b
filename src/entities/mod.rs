//! Entity module - Contains the well-typed ledger records.
//! These types are the validated internal form of the loosely-typed documents
//! held by the remote store; [`crate::core::normalize`] is the single
//! conversion point between the two.

pub mod entry;
pub mod overrides;

// Re-export the record types used throughout the crate
pub use entry::{BudgetEntry, EntryDraft, EntryType, Fund, Impact, Scope};
pub use overrides::BudgetOverride;
