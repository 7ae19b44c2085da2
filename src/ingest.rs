//! Ingestion path: embedding backfill and id assignment.
//!
//! The search core never triggers bulk re-embedding; this module is the
//! out-of-band writer invoked by the admin/refresh surface.

use anyhow::{Context, Result};

use crate::embedding;
use crate::models::FaqEntry;
use crate::state::AppState;

/// Embed every entry that has no cached vector (or a vector of a stale
/// dimension) and upsert the results. Returns how many entries were
/// embedded.
pub async fn backfill_embeddings(state: &AppState) -> Result<usize> {
    let entries = state.store.list_all()?;
    let dimension = state.config.embedding.dimension;

    let pending: Vec<FaqEntry> = entries
        .into_iter()
        .filter(|e| e.embedding.as_ref().map(|v| v.len()) != Some(dimension))
        .collect();

    if pending.is_empty() {
        return Ok(0);
    }

    let questions: Vec<String> = pending.iter().map(|e| e.question.clone()).collect();
    let vectors = embedding::embed_batch(
        &state.http_client,
        state.provider,
        &state.config.embedding,
        &questions,
    )
    .await
    .context("embedding backfill failed")?;

    let mut updated = 0usize;
    for (mut entry, vector) in pending.into_iter().zip(vectors) {
        entry.embedding = Some(vector);
        state.store.upsert(entry)?;
        updated += 1;
    }

    tracing::info!(count = updated, "backfilled embeddings");
    Ok(updated)
}

/// Assign the next free id of the form `Q<n>`, above the highest numeric
/// suffix already in use. Ids are never reused because entries are never
/// deleted.
pub fn next_faq_id(entries: &[FaqEntry]) -> String {
    let max_suffix = entries
        .iter()
        .filter_map(|e| {
            e.id.strip_prefix('Q')
                .and_then(|rest| rest.split('.').next())
                .and_then(|n| n.parse::<u64>().ok())
        })
        .max()
        .unwrap_or(0);
    format!("Q{}", max_suffix + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::Utc;

    fn entry(id: &str) -> FaqEntry {
        FaqEntry {
            id: id.to_string(),
            question: "q".to_string(),
            answer: "a".to_string(),
            category: Category::General,
            embedding: None,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_next_id_on_empty_corpus() {
        assert_eq!(next_faq_id(&[]), "Q1");
    }

    #[test]
    fn test_next_id_skips_past_highest_suffix() {
        let entries = vec![entry("Q1.1"), entry("Q7"), entry("Q3.2")];
        assert_eq!(next_faq_id(&entries), "Q8");
    }

    #[test]
    fn test_next_id_ignores_non_numeric_ids() {
        let entries = vec![entry("legacy-faq"), entry("Q2")];
        assert_eq!(next_faq_id(&entries), "Q3");
    }
}
