//! FAQ document store.
//!
//! The search core only reads `list_all` at (re)build time; writes come
//! from the ingestion/admin path.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

use crate::models::FaqEntry;

/// Document store interface. `id` is unique across the store and never
/// reused.
pub trait FaqStore: Send + Sync {
    fn list_all(&self) -> Result<Vec<FaqEntry>>;
    fn get_by_id(&self, id: &str) -> Result<Option<FaqEntry>>;
    /// Replace the entry with the same id, or insert it at the end.
    fn upsert(&self, entry: FaqEntry) -> Result<()>;
    /// Insert a new entry. Fails on a duplicate id.
    fn append(&self, entry: FaqEntry) -> Result<()>;
}

/// JSON-file-backed store with an in-memory copy. Persistence is atomic
/// (temp file + rename), so a crash mid-write leaves the previous file
/// intact.
pub struct JsonFaqStore {
    entries: RwLock<Vec<FaqEntry>>,
    persist_path: PathBuf,
}

impl JsonFaqStore {
    pub fn open_or_create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read FAQ store at {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("failed to parse FAQ store at {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            persist_path: path.to_path_buf(),
        })
    }

    fn persist(&self, entries: &[FaqEntry]) -> Result<()> {
        let data = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.persist_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &data).context("failed to write FAQ store temp file")?;
        std::fs::rename(&tmp_path, &self.persist_path).context("failed to replace FAQ store")?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl FaqStore for JsonFaqStore {
    fn list_all(&self) -> Result<Vec<FaqEntry>> {
        Ok(self.entries.read().clone())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<FaqEntry>> {
        Ok(self.entries.read().iter().find(|e| e.id == id).cloned())
    }

    fn upsert(&self, entry: FaqEntry) -> Result<()> {
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        self.persist(&entries)
    }

    fn append(&self, entry: FaqEntry) -> Result<()> {
        let mut entries = self.entries.write();
        if entries.iter().any(|e| e.id == entry.id) {
            anyhow::bail!("FAQ id {} already exists", entry.id);
        }
        entries.push(entry);
        self.persist(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::Utc;

    fn entry(id: &str, question: &str) -> FaqEntry {
        FaqEntry {
            id: id.to_string(),
            question: question.to_string(),
            answer: "answer".to_string(),
            category: Category::Registration,
            embedding: None,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFaqStore::open_or_create(&dir.path().join("faqs.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_append_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("faqs.json");

        let store = JsonFaqStore::open_or_create(&path).unwrap();
        store.append(entry("Q1", "How do I register?")).unwrap();
        store.append(entry("Q2", "Attendance policy?")).unwrap();

        let reloaded = JsonFaqStore::open_or_create(&path).unwrap();
        let entries = reloaded.list_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "Q1");
        assert_eq!(entries[1].id, "Q2");
    }

    #[test]
    fn test_append_duplicate_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFaqStore::open_or_create(&dir.path().join("faqs.json")).unwrap();
        store.append(entry("Q1", "first")).unwrap();
        assert!(store.append(entry("Q1", "second")).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFaqStore::open_or_create(&dir.path().join("faqs.json")).unwrap();
        store.append(entry("Q1", "first")).unwrap();
        store.append(entry("Q2", "second")).unwrap();

        let mut updated = entry("Q1", "first");
        updated.embedding = Some(vec![0.1, 0.2]);
        store.upsert(updated).unwrap();

        let entries = store.list_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "Q1");
        assert!(entries[0].embedding.is_some());
    }

    #[test]
    fn test_get_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFaqStore::open_or_create(&dir.path().join("faqs.json")).unwrap();
        store.append(entry("Q1", "first")).unwrap();
        assert!(store.get_by_id("Q1").unwrap().is_some());
        assert!(store.get_by_id("Q99").unwrap().is_none());
    }
}
