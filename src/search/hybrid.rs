//! Hybrid ranker: weighted blend of lexical and semantic similarity.

use crate::error::SearchError;
use crate::models::{SearchMethod, SearchResult};
use crate::search::semantic;
use crate::search::snapshot::Snapshot;

/// Blend weights, validated at configuration time to sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub tfidf: f32,
    pub embedding: f32,
}

/// Reject empty/whitespace queries and non-positive top_k. Called by the
/// handler before the query embedding is requested, and again by `rank`.
pub fn validate(query: &str, top_k: i64) -> Result<(), SearchError> {
    if query.trim().is_empty() {
        return Err(SearchError::InvalidQuery(
            "query must not be empty".to_string(),
        ));
    }
    if top_k <= 0 {
        return Err(SearchError::InvalidQuery(format!(
            "top_k must be positive, got {top_k}"
        )));
    }
    Ok(())
}

/// Rank every snapshot entry for the query and return the top_k.
///
/// `query_embedding` is `None` when the provider call failed or timed out;
/// the ranking then degrades to lexical-only and every result reports
/// `search_method: "tfidf"`. Ties break by ascending snapshot order, so
/// identical input always produces the identical ordered list.
pub fn rank(
    snapshot: &Snapshot,
    query: &str,
    query_embedding: Option<&[f32]>,
    top_k: i64,
    weights: Weights,
) -> Result<Vec<SearchResult>, SearchError> {
    validate(query, top_k)?;

    // Valid state, not an error: an empty corpus has no matches.
    if snapshot.is_empty() {
        return Ok(Vec::new());
    }

    let tfidf_scores = snapshot.tfidf.score(query);
    let embedding_scores =
        query_embedding.map(|vector| semantic::score_entries(&snapshot.entries, vector));

    let mut scored: Vec<(usize, SearchResult)> = snapshot
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let tfidf_score = tfidf_scores[i];
            let embedding_score = embedding_scores.as_ref().map(|s| s[i]).unwrap_or(0.0);

            let search_method = if query_embedding.is_some() && entry.embedding.is_some() {
                SearchMethod::Hybrid
            } else {
                SearchMethod::Tfidf
            };

            let similarity_score =
                weights.tfidf * tfidf_score + weights.embedding * embedding_score;

            let result = SearchResult {
                faq_id: entry.id.clone(),
                question: entry.question.clone(),
                answer: entry.answer.clone(),
                category: entry.category,
                similarity_score,
                tfidf_score,
                embedding_score,
                search_method,
            };
            (i, result)
        })
        .collect();

    scored.sort_by(|(ia, a), (ib, b)| {
        b.similarity_score
            .partial_cmp(&a.similarity_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(ia.cmp(ib))
    });

    scored.truncate(top_k as usize);
    Ok(scored.into_iter().map(|(_, result)| result).collect())
}
