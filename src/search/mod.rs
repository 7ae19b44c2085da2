//! Hybrid search: a TF-IDF lexical index and cached embeddings, blended by
//! the ranker over an immutable corpus snapshot.

pub mod hybrid;
pub mod semantic;
pub mod snapshot;
pub mod tfidf;
