use axum::extract::State;
use axum::Json;

use crate::api::ApiError;
use crate::embedding;
use crate::models::{SearchMethod, SearchRequest, SearchResponse};
use crate::search::hybrid::{self, Weights};
use crate::state::AppState;

/// POST /api/search - Hybrid FAQ search:
///   1. Load the current corpus snapshot.
///   2. Embed the query via the configured provider; on failure, degrade
///      the whole ranking to lexical-only instead of failing the request.
///   3. Blend TF-IDF and embedding similarity, return the ranked top_k.
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = req.query.trim().to_string();
    let top_k = req.top_k;

    let snapshot = state.index.load()?;

    // Reject invalid input before spending a provider call on it.
    hybrid::validate(&query, top_k)?;

    let query_embedding = if snapshot.embedded_count() > 0 {
        match embedding::embed_query(
            &state.http_client,
            state.provider,
            &state.config.embedding,
            &query,
        )
        .await
        {
            Ok(vector) => Some(vector),
            Err(e) => {
                tracing::warn!("query embedding failed, degrading to lexical-only: {e}");
                None
            }
        }
    } else {
        // Nothing cached to compare against; skip the provider round-trip.
        None
    };

    let weights = Weights {
        tfidf: state.config.search.tfidf_weight as f32,
        embedding: state.config.search.embedding_weight as f32,
    };

    let results = hybrid::rank(
        &snapshot,
        &query,
        query_embedding.as_deref(),
        top_k,
        weights,
    )?;

    let search_method = if query_embedding.is_some() {
        SearchMethod::Hybrid
    } else {
        SearchMethod::Tfidf
    };

    Ok(Json(SearchResponse {
        query,
        total_results: results.len(),
        results,
        search_method,
    }))
}
