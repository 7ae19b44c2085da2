use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single FAQ entry as stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Stable unique identifier (e.g. "Q1.1"), assigned at ingestion.
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Category,
    /// Dense vector, absent until the ingestion path has embedded the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

/// The closed set of FAQ categories. Metadata only, never used for filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Registration,
    Platform,
    Attendance,
    Assignments,
    Projects,
    Certification,
    Internship,
    Schedule,
    Technical,
    Payment,
    Support,
    #[default]
    #[serde(other)]
    General,
}

/// Which similarity signals contributed to a result's score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// Both TF-IDF and embedding similarity contributed.
    Hybrid,
    /// Lexical only: no usable document vector or the query embedding failed.
    Tfidf,
    /// Semantic only. Present in the wire format, but no default policy emits it.
    Embedding,
}

/// A ranked search result. Response-time projection, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub faq_id: String,
    pub question: String,
    pub answer: String,
    pub category: Category,
    /// Weighted blend of the two scores below, in [0, 1].
    pub similarity_score: f32,
    pub tfidf_score: f32,
    pub embedding_score: f32,
    pub search_method: SearchMethod,
}

/// Search request
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

fn default_top_k() -> i64 {
    3
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub total_results: usize,
    /// "hybrid" when the query embedding was obtained, "tfidf" when the
    /// whole ranking degraded to lexical-only.
    pub search_method: SearchMethod,
}

/// Add-FAQ request (admin surface)
#[derive(Debug, Clone, Deserialize)]
pub struct AddFaqRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub category: Category,
}
