//! In-process implementation of the document store contract.
//!
//! `MemoryStore` gives tests (and local tooling) the same semantics the
//! remote store provides: atomic single-document writes, snapshot-push
//! subscriptions ordered newest-created-first, and injectable failures so
//! the error paths can be exercised without a network.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

use super::{DocumentStore, RawDocument, StoreEvent};
use crate::errors::{Error, Result};

/// In-memory, push-notifying document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: HashMap<String, BTreeMap<String, RawDocument>>,
    watchers: HashMap<String, Vec<UnboundedSender<StoreEvent>>>,
    next_id: u64,
    write_failure: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a transport error carrying
    /// `message`, until [`MemoryStore::restore_writes`] is called.
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.lock().write_failure = Some(message.into());
    }

    /// Clears an injected write failure.
    pub fn restore_writes(&self) {
        self.lock().write_failure = None;
    }

    /// Pushes a subscription failure to every watcher of `collection`, as a
    /// permission or network loss would. Stored data is untouched.
    pub fn emit_error(&self, collection: &str, message: &str) {
        let mut inner = self.lock();
        if let Some(watchers) = inner.watchers.get_mut(collection) {
            watchers.retain(|tx| tx.send(StoreEvent::Error(message.to_string())).is_ok());
        }
    }

    /// Number of documents currently held in `collection`.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.lock()
            .collections
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Whether `collection` holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    // Lock poisoning cannot corrupt the document maps (every mutation
    // completes before any send), so recover instead of propagating.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn check_writable(&self) -> Result<()> {
        match &self.write_failure {
            Some(message) => Err(Error::transport(message.clone())),
            None => Ok(()),
        }
    }

    /// Current snapshot of a collection, newest-created-first. Ids assigned
    /// by this store are monotonically increasing, so they break creation
    /// timestamp ties deterministically.
    fn snapshot(&self, collection: &str) -> Vec<RawDocument> {
        let mut docs: Vec<RawDocument> = self
            .collections
            .get(collection)
            .map(|c| c.values().cloned().collect())
            .unwrap_or_default();
        docs.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        docs
    }

    fn broadcast(&mut self, collection: &str) {
        let snapshot = self.snapshot(collection);
        if let Some(watchers) = self.watchers.get_mut(collection) {
            watchers.retain(|tx| tx.send(StoreEvent::Snapshot(snapshot.clone())).is_ok());
        }
    }
}

impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, data: Value) -> Result<String> {
        let mut inner = self.lock();
        inner.check_writable()?;

        inner.next_id += 1;
        let id = format!("{:08}", inner.next_id);
        let now = Utc::now();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(
                id.clone(),
                RawDocument {
                    id: id.clone(),
                    data,
                    created_at: now,
                    updated_at: now,
                },
            );
        trace!("created document {id} in {collection}");

        inner.broadcast(collection);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        let mut inner = self.lock();
        inner.check_writable()?;

        let doc = inner
            .collections
            .get_mut(collection)
            .and_then(|c| c.get_mut(id))
            .ok_or_else(|| Error::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;
        doc.data = data;
        doc.updated_at = Utc::now();

        inner.broadcast(collection);
        Ok(())
    }

    async fn upsert(&self, collection: &str, id: &str, data: Value) -> Result<()> {
        let mut inner = self.lock();
        inner.check_writable()?;

        let now = Utc::now();
        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .entry(id.to_string())
            .and_modify(|doc| {
                doc.data = data.clone();
                doc.updated_at = now;
            })
            .or_insert_with(|| RawDocument {
                id: id.to_string(),
                data,
                created_at: now,
                updated_at: now,
            });

        inner.broadcast(collection);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.check_writable()?;

        inner
            .collections
            .get_mut(collection)
            .and_then(|c| c.remove(id))
            .ok_or_else(|| Error::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        inner.broadcast(collection);
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<RawDocument>> {
        let inner = self.lock();
        Ok(inner
            .collections
            .get(collection)
            .and_then(|c| c.get(id))
            .cloned())
    }

    async fn subscribe(&self, collection: &str) -> Result<UnboundedReceiver<StoreEvent>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();

        // New subscribers get the current snapshot immediately
        let snapshot = inner.snapshot(collection);
        tx.send(StoreEvent::Snapshot(snapshot))
            .map_err(|_| Error::transport("subscription channel closed before first snapshot"))?;
        inner
            .watchers
            .entry(collection.to_string())
            .or_default()
            .push(tx);

        Ok(rx)
    }
}
