//! Corpus snapshot and the shared handle that swaps it on rebuild.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::SearchError;
use crate::models::FaqEntry;
use crate::search::tfidf::TfidfIndex;

/// An immutable point-in-time copy of the corpus with its fitted lexical
/// index. Built off to the side and installed atomically; never mutated.
pub struct Snapshot {
    pub entries: Vec<FaqEntry>,
    pub tfidf: TfidfIndex,
    pub built_at: DateTime<Utc>,
}

impl Snapshot {
    /// Build a snapshot from store entries. Cached embeddings whose length
    /// does not match `embedding_dim` are dropped (treated as absent) so a
    /// provider swap can never compare vectors across semantic spaces.
    pub fn build(mut entries: Vec<FaqEntry>, embedding_dim: usize) -> Self {
        for entry in &mut entries {
            if let Some(vector) = &entry.embedding {
                if vector.len() != embedding_dim {
                    tracing::warn!(
                        faq_id = %entry.id,
                        expected = embedding_dim,
                        actual = vector.len(),
                        "dropping cached embedding with stale dimension"
                    );
                    entry.embedding = None;
                }
            }
        }

        let questions: Vec<String> = entries.iter().map(|e| e.question.clone()).collect();
        let tfidf = TfidfIndex::build(&questions);

        Self {
            entries,
            tfidf,
            built_at: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn embedded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.embedding.is_some()).count()
    }
}

/// Shared reference to the current snapshot. Readers clone the `Arc`;
/// rebuild installs a replacement while searches in flight keep the one
/// they loaded.
#[derive(Default)]
pub struct IndexHandle {
    current: RwLock<Option<Arc<Snapshot>>>,
}

impl IndexHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, or `IndexNotReady` before the first install.
    pub fn load(&self) -> Result<Arc<Snapshot>, SearchError> {
        self.current
            .read()
            .clone()
            .ok_or(SearchError::IndexNotReady)
    }

    pub fn install(&self, snapshot: Arc<Snapshot>) {
        *self.current.write() = Some(snapshot);
    }

    pub fn is_ready(&self) -> bool {
        self.current.read().is_some()
    }
}
