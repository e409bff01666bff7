//! Generic CRUD repository over any entity collection.

use std::sync::Arc;

use entities::Entity;

use crate::{MemoryBackend, StorageBackend, StoreError, StoreResult};

/// CRUD operations for one entity collection.
///
/// The repository holds no records itself; every call goes straight to the
/// backend. Updates always use partial merge: fields missing from the patch
/// keep their stored values, regardless of backend.
pub struct ResourceRepository<E: Entity> {
    backend: Arc<dyn StorageBackend<E>>,
}

impl<E: Entity> Clone for ResourceRepository<E> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<E: Entity> ResourceRepository<E> {
    /// Creates a repository over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend<E>>) -> Self {
        Self { backend }
    }

    /// Creates a repository over a fresh in-memory backend.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::<E>::new()))
    }

    /// Creates a new record and returns it with its assigned id.
    pub async fn create(&self, base: E::Base) -> StoreResult<E> {
        let record = self.backend.insert(base).await?;
        tracing::debug!(collection = E::COLLECTION, id = record.id(), "Record created");
        Ok(record)
    }

    /// Lists every record in the collection.
    pub async fn list(&self) -> StoreResult<Vec<E>> {
        self.backend.list_all().await
    }

    /// Gets a record by ID.
    pub async fn get(&self, id: i64) -> StoreResult<E> {
        self.backend
            .get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found(E::NAME, id))
    }

    /// Merges `patch` into an existing record.
    pub async fn update(&self, id: i64, patch: E::Patch) -> StoreResult<E> {
        let record = self
            .backend
            .merge_by_id(id, patch)
            .await?
            .ok_or_else(|| StoreError::not_found(E::NAME, id))?;
        tracing::debug!(collection = E::COLLECTION, id, "Record updated");
        Ok(record)
    }

    /// Permanently removes a record.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        if !self.backend.delete_by_id(id).await? {
            return Err(StoreError::not_found(E::NAME, id));
        }
        tracing::debug!(collection = E::COLLECTION, id, "Record deleted");
        Ok(())
    }
}
