//! Storage access layer - the document store contract and the repositories
//! built on top of it.
//!
//! The ledger does not own persistence. It consumes a remote, real-time
//! document store through the [`DocumentStore`] trait: single-document
//! writes, and a subscription that pushes the entire current snapshot of a
//! collection on every change. [`memory::MemoryStore`] implements the
//! contract in-process for tests and as the reference semantics; the
//! production adapter lives in the host application.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::errors::Result;

/// Entry repository - validated writes and the live entry feed
pub mod entries;
/// In-process document store used by tests
pub mod memory;
/// Override repository - scope-keyed aggregate corrections
pub mod overrides;

pub use entries::EntryRepository;
pub use memory::MemoryStore;
pub use overrides::OverrideRepository;

/// One loosely-typed document as the store holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Store-assigned document id.
    pub id: String,
    /// The document body. Field types are not guaranteed - normalization
    /// owns the coercion into well-typed entries.
    pub data: Value,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Store-assigned last-write timestamp.
    pub updated_at: DateTime<Utc>,
}

/// What a subscription pushes.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// The entire current snapshot of the collection, newest-created-first.
    /// Consumers replace their local copy wholesale - this is never a diff.
    Snapshot(Vec<RawDocument>),
    /// The subscription failed (permission, network). Previously delivered
    /// data stays valid; the transport owns any retry.
    Error(String),
}

/// The remote document store collaborator.
///
/// Every write is a single-document atomic operation; no call spans multiple
/// documents and nothing here retries. Subscriptions push [`StoreEvent`]s
/// until the receiver is dropped.
pub trait DocumentStore: Send + Sync {
    /// Creates a document with a store-assigned id and returns the id.
    fn create(
        &self,
        collection: &str,
        data: Value,
    ) -> impl Future<Output = Result<String>> + Send;

    /// Replaces the body of an existing document.
    fn update(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Creates or replaces a document under a caller-chosen id. Used for the
    /// scope-keyed override documents.
    fn upsert(
        &self,
        collection: &str,
        id: &str,
        data: Value,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Deletes a document. Deletion is permanent; the ledger has no
    /// soft-delete or versioning.
    fn delete(&self, collection: &str, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Fetches a single document, `None` if absent.
    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = Result<Option<RawDocument>>> + Send;

    /// Opens a push subscription on a collection. The current snapshot is
    /// delivered immediately, then again after every change. Dropping the
    /// receiver unsubscribes.
    fn subscribe(
        &self,
        collection: &str,
    ) -> impl Future<Output = Result<UnboundedReceiver<StoreEvent>>> + Send;
}
