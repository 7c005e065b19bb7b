//! Entry repository - validated writes to the ledger collection and the live
//! entry feed.
//!
//! All writes are single-document and atomic; the store either applies a
//! write fully or fails it. Validation runs before anything reaches the
//! store, so a rejected draft leaves the ledger untouched. Transport errors
//! propagate to the caller unmodified - retry and backoff belong to the
//! transport layer, not here.

use std::sync::Arc;

use tracing::info;

use super::DocumentStore;
use crate::cache::EntryFeed;
use crate::entities::EntryDraft;
use crate::errors::Result;

/// Handle to the ledger entry collection.
#[derive(Debug)]
pub struct EntryRepository<S> {
    store: Arc<S>,
    collection: String,
}

impl<S> Clone for EntryRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection.clone(),
        }
    }
}

impl<S: DocumentStore> EntryRepository<S> {
    /// Creates a repository over the given store and collection name.
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Validates a draft and creates a new ledger entry, returning the
    /// store-assigned id.
    ///
    /// # Errors
    /// Validation errors surface synchronously before any write; transport
    /// errors come back unmodified from the store.
    pub async fn create(&self, draft: &EntryDraft) -> Result<String> {
        draft.validate()?;
        let id = self.store.create(&self.collection, draft.document()?).await?;
        info!("created ledger entry {id}: {}", draft.title.trim());
        Ok(id)
    }

    /// Validates a draft and replaces an existing entry wholesale.
    ///
    /// Two editors updating the same entry concurrently race at the storage
    /// layer with last-write-wins semantics; this crate does not detect the
    /// conflict.
    pub async fn update(&self, id: &str, draft: &EntryDraft) -> Result<()> {
        draft.validate()?;
        self.store
            .update(&self.collection, id, draft.document()?)
            .await?;
        info!("updated ledger entry {id}");
        Ok(())
    }

    /// Deletes an entry permanently. There is no soft-delete or versioning;
    /// from the ledger's perspective deletion is irreversible.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(&self.collection, id).await?;
        info!("deleted ledger entry {id}");
        Ok(())
    }

    /// Opens the live entry feed: every change to the collection delivers a
    /// full normalized snapshot, newest-created-first.
    pub async fn subscribe(&self) -> Result<EntryFeed> {
        let events = self.store.subscribe(&self.collection).await?;
        info!("subscribed to ledger collection {}", self.collection);
        Ok(EntryFeed::spawn(events))
    }
}
