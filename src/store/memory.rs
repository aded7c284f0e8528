//! In-process document store.

use crate::store::{Document, DocumentId, DocumentStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

type Collections = HashMap<String, HashMap<DocumentId, Document>>;

/// Document store held in memory. Clones share the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: while offline every call fails with `Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: Document) -> StoreResult<DocumentId> {
        self.check_online()?;
        let id = Uuid::new_v4().simple().to_string();
        let mut g = self.collections.write().await;
        g.entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        self.check_online()?;
        let mut g = self.collections.write().await;
        g.entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        self.check_online()?;
        let mut g = self.collections.write().await;
        match g.get_mut(collection).and_then(|c| c.get_mut(id)) {
            Some(existing) => {
                *existing = document;
                Ok(())
            }
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        self.check_online()?;
        let g = self.collections.read().await;
        Ok(g.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn list(&self, collection: &str) -> StoreResult<Vec<(DocumentId, Document)>> {
        self.check_online()?;
        let g = self.collections.read().await;
        Ok(g.get(collection)
            .map(|c| c.iter().map(|(id, doc)| (id.clone(), doc.clone())).collect())
            .unwrap_or_default())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.check_online()?;
        let mut g = self.collections.write().await;
        match g.get_mut(collection).and_then(|c| c.remove(id)) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
