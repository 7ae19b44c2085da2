//! Semantic scoring against cached document vectors.
//!
//! Scores are cosine similarity clamped into [0, 1]: a negative cosine
//! scores 0, so an absent vector and an anti-correlated vector rank the
//! same and a degraded ranking collapses exactly to pure TF-IDF.

use crate::models::FaqEntry;

/// Score every entry against the query vector, in corpus order. Entries
/// with no cached vector, or a vector of the wrong length, score 0.
pub fn score_entries(entries: &[FaqEntry], query_vector: &[f32]) -> Vec<f32> {
    entries
        .iter()
        .map(|entry| match &entry.embedding {
            Some(doc_vector) => cosine_similarity(query_vector, doc_vector).clamp(0.0, 1.0),
            None => 0.0,
        })
        .collect()
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}
