//! Persistence boundary: the document store contract, an in-memory store, and the
//! bracket/team adapters built on top of it.

mod document;
mod memory;
mod repository;
mod teams;

pub use memory::MemoryStore;
pub use repository::{BracketRepository, ListOrder, RepositoryError};
pub use teams::{import_teams_csv, StoreTeamSource, TeamSource};

use std::future::Future;

/// JSON-like record stored in a collection.
pub type Document = serde_json::Value;

/// Opaque key of a document within its collection.
pub type DocumentId = String;

/// Collection holding team documents.
pub const TEAMS_COLLECTION: &str = "teams";
/// Collection holding bracket documents.
pub const BRACKETS_COLLECTION: &str = "tournaments";

/// Failures reported by a document store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    /// No document under this id.
    NotFound(DocumentId),
    /// Transport or availability failure.
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Document {} not found", id),
            StoreError::Unavailable(reason) => write!(f, "Store unavailable: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value document collections. Each write replaces a whole document atomically; there is
/// no revision check, so concurrent read-modify-write cycles can overwrite each other.
pub trait DocumentStore: Send + Sync {
    /// Add a document under a store-assigned id.
    fn insert(
        &self,
        collection: &str,
        document: Document,
    ) -> impl Future<Output = StoreResult<DocumentId>> + Send;

    /// Write a document under a caller-supplied id, creating or replacing it.
    fn set(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Replace an existing document. Fails with `NotFound` if it is absent.
    fn update(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    fn get(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<Document>>> + Send;

    /// Every document in the collection, in no particular order.
    fn list(
        &self,
        collection: &str,
    ) -> impl Future<Output = StoreResult<Vec<(DocumentId, Document)>>> + Send;

    /// Fails with `NotFound` if the document is absent.
    fn delete(&self, collection: &str, id: &str) -> impl Future<Output = StoreResult<()>> + Send;
}
