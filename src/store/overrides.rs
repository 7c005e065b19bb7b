//! Override repository - fetches the scope-keyed aggregate corrections.
//!
//! Overrides live in their own collection, one document per scope key (a
//! department name, or the literal `"ALL"` for the organization-wide scope).
//! The merge contract is additive, zero-default, and scope-keyed: a missing
//! document or a malformed field reads as zero. Writing overrides is an
//! editor-UI concern and goes through the store's `upsert` directly.

use std::sync::Arc;

use tracing::trace;

use super::DocumentStore;
use crate::core::normalize;
use crate::entities::{BudgetOverride, Scope};
use crate::errors::Result;

/// Handle to the override collection.
#[derive(Debug)]
pub struct OverrideRepository<S> {
    store: Arc<S>,
    collection: String,
}

impl<S> Clone for OverrideRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            collection: self.collection.clone(),
        }
    }
}

impl<S: DocumentStore> OverrideRepository<S> {
    /// Creates a repository over the given store and collection name.
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Fetches the override for a scope, defaulting every field to zero when
    /// the document is absent or a field is malformed.
    pub async fn fetch(&self, scope: &Scope) -> Result<BudgetOverride> {
        let fetched = self.store.get(&self.collection, scope.key()).await?;
        trace!(
            "fetched override for scope {} (present: {})",
            scope.key(),
            fetched.is_some()
        );

        Ok(fetched.map_or(BudgetOverride::ZERO, |doc| {
            normalize::normalize_override(&doc.data)
        }))
    }
}
