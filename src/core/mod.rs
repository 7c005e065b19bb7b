//! Core ledger logic - framework-agnostic normalization, aggregation, and
//! view policy.
//!
//! Everything in this module is pure and synchronous: it operates over
//! already-fetched in-memory snapshots and never touches the store. The
//! storage layer feeds it; page-level UI consumes it.

/// Aggregation engine - revenue, expenditure, fund utilization, available
pub mod aggregate;
/// Classification and normalization of raw stored documents
pub mod normalize;
/// Role-scoped visibility, search, and pagination policy
pub mod view;
