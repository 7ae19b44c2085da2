//! # faq-search
//!
//! A small FAQ retrieval service: given a natural-language query, it
//! returns the best-matching FAQ entries from a fixed corpus by blending
//! lexical (TF-IDF) and semantic (embedding) similarity, exposed over a
//! lightweight HTTP API so external chat agents can call it as a tool.
//!
//! ## Pipeline
//!
//! ```text
//!   refresh trigger ──▶ store.list_all() ──▶ Snapshot { entries, TfidfIndex }
//!                                                   │ (atomic swap)
//!                                                   ▼
//!   query ──▶ embed_query (may fail ⇒ lexical-only) ─▶ Hybrid Ranker
//!                                                   │
//!               tfidf_weight · tfidf + embedding_weight · semantic
//!                                                   ▼
//!                                        ranked top-k SearchResults
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration with fail-fast validation
//! - [`models`] - Shared data types: `FaqEntry`, `SearchResult`, request/response types
//! - [`store`] - FAQ document store trait and the JSON-file implementation
//! - [`embedding`] - Embedding providers (Ollama or OpenAI-compatible)
//! - [`search::tfidf`] - TF-IDF lexical index with cosine scoring
//! - [`search::semantic`] - Cosine scoring against cached document vectors
//! - [`search::hybrid`] - Weighted blend, ranking, and tie-breaking
//! - [`search::snapshot`] - Immutable corpus snapshot and the swap handle
//! - [`ingest`] - Out-of-band embedding backfill and id assignment
//! - [`api`] - Axum HTTP handlers for search, FAQ admin, and health
//! - [`state`] - Shared application state and the rebuild path
//! - [`error`] - Typed error taxonomy

pub mod api;
pub mod config;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod models;
pub mod search;
pub mod state;
pub mod store;
