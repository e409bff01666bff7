//! In-memory storage backend.

use async_trait::async_trait;
use entities::Entity;
use tokio::sync::RwLock;

use crate::{IdAllocator, StorageBackend, StoreResult};

/// In-memory backend holding one collection as an ordered sequence.
///
/// Lookups are linear scans by id. Every mutation takes the write lock, and
/// ids are allocated while it is held, so the sequence stays sorted by id.
#[derive(Debug)]
pub struct MemoryBackend<E> {
    records: RwLock<Vec<E>>,
    ids: IdAllocator,
}

impl<E> MemoryBackend<E> {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            ids: IdAllocator::new(),
        }
    }
}

impl<E> Default for MemoryBackend<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> StorageBackend<E> for MemoryBackend<E> {
    async fn insert(&self, base: E::Base) -> StoreResult<E> {
        let mut records = self.records.write().await;
        let record = E::from_base(self.ids.next(), base);
        records.push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> StoreResult<Option<E>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<E>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn merge_by_id(&self, id: i64, patch: E::Patch) -> StoreResult<Option<E>> {
        let mut records = self.records.write().await;
        Ok(records.iter_mut().find(|r| r.id() == id).map(|record| {
            record.apply_patch(patch);
            record.clone()
        }))
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<bool> {
        let mut records = self.records.write().await;
        match records.iter().position(|r| r.id() == id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use entities::{Task, TaskBase, TaskPatch};

    use super::*;

    #[tokio::test]
    async fn test_task_crud() {
        let backend = MemoryBackend::<Task>::new();

        // Insert
        let created = backend.insert(TaskBase::new("Water plants")).await.unwrap();
        assert_eq!(created.id, 1);

        // Get
        let fetched = backend.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        // Merge
        let merged = backend
            .merge_by_id(created.id, TaskPatch::completed(true))
            .await
            .unwrap()
            .unwrap();
        assert!(merged.completed);
        assert_eq!(merged.title, "Water plants");

        // Delete
        assert!(backend.delete_by_id(created.id).await.unwrap());
        assert!(backend.get_by_id(created.id).await.unwrap().is_none());
        assert!(!backend.delete_by_id(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let backend = MemoryBackend::<Task>::new();
        for title in ["a", "b", "c"] {
            backend.insert(TaskBase::new(title)).await.unwrap();
        }
        backend.delete_by_id(2).await.unwrap();

        let titles: Vec<String> = backend
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_merge_missing_returns_none() {
        let backend = MemoryBackend::<Task>::new();
        let merged = backend
            .merge_by_id(42, TaskPatch::completed(true))
            .await
            .unwrap();
        assert!(merged.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let backend = std::sync::Arc::new(MemoryBackend::<Task>::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let backend = backend.clone();
                tokio::spawn(async move {
                    backend
                        .insert(TaskBase::new(format!("task {i}")))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<i64>>());

        let listed: Vec<i64> = backend.list_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(listed, (1..=16).collect::<Vec<i64>>());
    }
}
