//! Storage backend trait definition.

use async_trait::async_trait;
use entities::Entity;

use crate::StoreResult;

/// Persistence for one entity collection.
///
/// Backends own their records; callers only ever receive copies.
#[async_trait]
pub trait StorageBackend<E: Entity>: Send + Sync {
    /// Assigns an id to `base`, stores it, and returns the stored record.
    async fn insert(&self, base: E::Base) -> StoreResult<E>;

    /// Gets a record by ID.
    async fn get_by_id(&self, id: i64) -> StoreResult<Option<E>>;

    /// Lists all records in insertion order.
    async fn list_all(&self) -> StoreResult<Vec<E>>;

    /// Merges `patch` into the record with the given ID.
    ///
    /// Returns the updated record, or `None` if no record has that ID. The
    /// read and the write happen atomically with respect to other calls on
    /// the same backend.
    async fn merge_by_id(&self, id: i64, patch: E::Patch) -> StoreResult<Option<E>>;

    /// Deletes a record. Returns true if a record existed and was removed.
    async fn delete_by_id(&self, id: i64) -> StoreResult<bool>;
}
