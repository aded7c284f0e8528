//! Bracket repository: maps brackets to documents in the `tournaments` collection.
//!
//! Saves are whole-document replacements. Callers load the latest bracket, apply one
//! operation and save it back; two callers doing this at once will lose one update.

use crate::logic::{compute_stats, BracketStats};
use crate::models::{Bracket, BracketId, BracketSummary};
use crate::store::document::{bracket_from_document, bracket_to_document};
use crate::store::{DocumentStore, StoreError, BRACKETS_COLLECTION};

/// Errors returned by the bracket repository and team source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RepositoryError {
    /// No document under this id.
    NotFound(String),
    /// The store could not be reached. Never retried here.
    StoreUnavailable(String),
    /// A stored document could not be mapped to the model.
    Malformed { id: String, reason: String },
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepositoryError::NotFound(id) => write!(f, "No record with id {}", id),
            RepositoryError::StoreUnavailable(reason) => write!(f, "Store unavailable: {}", reason),
            RepositoryError::Malformed { id, reason } => {
                write!(f, "Record {} is malformed: {}", id, reason)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

impl From<StoreError> for RepositoryError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => RepositoryError::NotFound(id),
            StoreError::Unavailable(reason) => RepositoryError::StoreUnavailable(reason),
        }
    }
}

/// Listing order by creation time.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ListOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Load/save/list/delete brackets over a document store.
#[derive(Clone, Debug)]
pub struct BracketRepository<S> {
    store: S,
}

impl<S: DocumentStore> BracketRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert a new bracket (store assigns the id) or replace an existing one.
    /// Returns the id the bracket is stored under.
    pub async fn save(&self, bracket: &Bracket) -> Result<BracketId, RepositoryError> {
        let doc = bracket_to_document(bracket).map_err(|e| RepositoryError::Malformed {
            id: bracket.id.clone().unwrap_or_default(),
            reason: e.to_string(),
        })?;
        match &bracket.id {
            Some(id) => {
                self.store.update(BRACKETS_COLLECTION, id, doc).await?;
                log::info!("Updated bracket {} ({})", id, bracket.name);
                Ok(id.clone())
            }
            None => {
                let id = self.store.insert(BRACKETS_COLLECTION, doc).await?;
                log::info!(
                    "Saved new bracket {} ({}, {} matchups)",
                    id,
                    bracket.name,
                    bracket.matchups.len()
                );
                Ok(id)
            }
        }
    }

    pub async fn load(&self, id: &str) -> Result<Bracket, RepositoryError> {
        let doc = self
            .store
            .get(BRACKETS_COLLECTION, id)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;
        log::debug!("Loaded bracket {}", id);
        bracket_from_document(id, doc).map_err(|reason| RepositoryError::Malformed {
            id: id.to_string(),
            reason,
        })
    }

    /// Every saved bracket that loads cleanly, newest first (ties by id).
    /// Malformed documents are skipped with a warning; `load` still reports them.
    pub async fn load_all(&self) -> Result<Vec<Bracket>, RepositoryError> {
        let docs = self.store.list(BRACKETS_COLLECTION).await?;
        let mut brackets = Vec::with_capacity(docs.len());
        for (id, doc) in docs {
            match bracket_from_document(&id, doc) {
                Ok(b) => brackets.push(b),
                Err(reason) => log::warn!("Skipping malformed bracket {}: {}", id, reason),
            }
        }
        brackets.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(brackets)
    }

    /// Summaries of every saved bracket from one full fetch.
    pub async fn list(&self, order: ListOrder) -> Result<Vec<BracketSummary>, RepositoryError> {
        let mut summaries: Vec<BracketSummary> = self
            .load_all()
            .await?
            .iter()
            .filter_map(Bracket::summary)
            .collect();
        if order == ListOrder::OldestFirst {
            summaries.reverse();
        }
        Ok(summaries)
    }

    /// The `limit` most recently created brackets.
    pub async fn recent(&self, limit: usize) -> Result<Vec<BracketSummary>, RepositoryError> {
        let mut summaries = self.list(ListOrder::NewestFirst).await?;
        summaries.truncate(limit);
        Ok(summaries)
    }

    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.store.delete(BRACKETS_COLLECTION, id).await?;
        log::info!("Deleted bracket {}", id);
        Ok(())
    }

    pub async fn stats(&self) -> Result<BracketStats, RepositoryError> {
        Ok(compute_stats(&self.load_all().await?))
    }
}
