use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::api::ApiError;
use crate::embedding;
use crate::ingest;
use crate::models::{AddFaqRequest, Category, FaqEntry};
use crate::state::AppState;

/// List/get projection: everything except the raw vector.
#[derive(Debug, Clone, Serialize)]
pub struct FaqView {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: Category,
    pub has_embedding: bool,
    pub added_at: chrono::DateTime<Utc>,
}

impl From<FaqEntry> for FaqView {
    fn from(entry: FaqEntry) -> Self {
        Self {
            id: entry.id,
            question: entry.question,
            answer: entry.answer,
            category: entry.category,
            has_embedding: entry.embedding.is_some(),
            added_at: entry.added_at,
        }
    }
}

/// GET /api/faqs - List all entries in the store.
pub async fn list_faqs(State(state): State<AppState>) -> Result<Json<Vec<FaqView>>, ApiError> {
    let entries = state.store.list_all()?;
    Ok(Json(entries.into_iter().map(FaqView::from).collect()))
}

/// GET /api/faqs/{id} - Fetch one entry.
pub async fn get_faq(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FaqView>, ApiError> {
    match state.store.get_by_id(&id)? {
        Some(entry) => Ok(Json(entry.into())),
        None => Err(ApiError::NotFound(format!("FAQ {id} not found"))),
    }
}

/// POST /api/faqs - Append a new entry, embed it best-effort, rebuild.
pub async fn add_faq(
    State(state): State<AppState>,
    Json(req): Json<AddFaqRequest>,
) -> Result<(StatusCode, Json<FaqView>), ApiError> {
    let question = req.question.trim().to_string();
    let answer = req.answer.trim().to_string();
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::BadRequest(
            "question and answer are required".to_string(),
        ));
    }

    let id = ingest::next_faq_id(&state.store.list_all()?);

    // Embed up front so the entry is searchable semantically right away;
    // a provider failure leaves the vector to the next backfill.
    let vector = match embedding::embed_query(
        &state.http_client,
        state.provider,
        &state.config.embedding,
        &question,
    )
    .await
    {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(faq_id = %id, "embedding new FAQ failed: {e}");
            None
        }
    };

    let entry = FaqEntry {
        id,
        question,
        answer,
        category: req.category,
        embedding: vector,
        added_at: Utc::now(),
    };

    state.store.append(entry.clone())?;
    state.rebuild_index().await?;

    Ok((StatusCode::CREATED, Json(entry.into())))
}

#[derive(Debug, Serialize)]
pub struct ReindexResponse {
    pub entries: usize,
    pub embedded: usize,
    pub backfilled: usize,
}

/// POST /api/reindex - Refresh trigger: backfill missing embeddings, then
/// rebuild the snapshot and swap it in.
pub async fn reindex(State(state): State<AppState>) -> Result<Json<ReindexResponse>, ApiError> {
    let backfilled = match ingest::backfill_embeddings(&state).await {
        Ok(count) => count,
        Err(e) => {
            // Rebuild anyway: a dead provider must not block lexical refresh.
            tracing::warn!("embedding backfill failed: {e:#}");
            0
        }
    };

    let snapshot = state.rebuild_index().await?;

    Ok(Json(ReindexResponse {
        entries: snapshot.len(),
        embedded: snapshot.embedded_count(),
        backfilled,
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub entries: usize,
    pub embedded: usize,
}

/// GET /api/health - Liveness plus snapshot stats.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let snapshot = state.index.load()?;
    Ok(Json(HealthResponse {
        status: "ok",
        entries: snapshot.len(),
        embedded: snapshot.embedded_count(),
    }))
}
