//! TF-IDF lexical index.
//!
//! Tokenization is lowercase with any non-alphanumeric character treated as
//! a separator, unigrams only, no stemming or stopword removal. The policy
//! is deterministic, so rebuilding from an unchanged corpus yields an
//! identical index.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// TF-IDF index fitted over a corpus. Owned by the snapshot that built it
/// and discarded wholesale on rebuild; there is no incremental update.
#[derive(Debug, Clone, Default)]
pub struct TfidfIndex {
    /// term -> column
    vocab: HashMap<String, usize>,
    /// Smoothed inverse document frequency per column.
    idf: Vec<f32>,
    /// One sparse, L2-normalized tf×idf vector per document, term columns
    /// ascending.
    doc_vectors: Vec<Vec<(usize, f32)>>,
}

impl TfidfIndex {
    /// Fit an index over the corpus. An empty corpus yields an empty index
    /// that scores 0 for everything.
    pub fn build(docs: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d)).collect();

        // Vocabulary in first-seen order keeps column assignment stable
        // across identical rebuilds.
        let mut vocab: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen: Vec<usize> = Vec::new();
            for token in tokens {
                let term_id = match vocab.entry(token.clone()) {
                    Entry::Occupied(e) => *e.get(),
                    Entry::Vacant(e) => {
                        let id = doc_freq.len();
                        e.insert(id);
                        doc_freq.push(0);
                        id
                    }
                };
                if !seen.contains(&term_id) {
                    seen.push(term_id);
                }
            }
            for term_id in seen {
                doc_freq[term_id] += 1;
            }
        }

        let n_docs = docs.len();
        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs as f32) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let doc_vectors = tokenized
            .iter()
            .map(|tokens| weigh_and_normalize(tokens, &vocab, &idf))
            .collect();

        Self {
            vocab,
            idf,
            doc_vectors,
        }
    }

    /// Cosine similarity of the query against every document, in corpus
    /// order. Query terms outside the vocabulary are ignored; a query with
    /// no overlap scores 0 everywhere.
    pub fn score(&self, query: &str) -> Vec<f32> {
        let tokens = tokenize(query);
        let query_vector = weigh_and_normalize(&tokens, &self.vocab, &self.idf);

        self.doc_vectors
            .iter()
            .map(|doc| sparse_dot(&query_vector, doc).clamp(0.0, 1.0))
            .collect()
    }

    pub fn doc_count(&self) -> usize {
        self.doc_vectors.len()
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }
}

/// Lowercase and split on non-alphanumeric runs.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Build a sparse, L2-normalized tf×idf vector, columns ascending.
fn weigh_and_normalize(
    tokens: &[String],
    vocab: &HashMap<String, usize>,
    idf: &[f32],
) -> Vec<(usize, f32)> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for token in tokens {
        if let Some(&term_id) = vocab.get(token) {
            *counts.entry(term_id).or_insert(0) += 1;
        }
    }

    let mut vector: Vec<(usize, f32)> = counts
        .into_iter()
        .map(|(term_id, tf)| (term_id, tf as f32 * idf[term_id]))
        .collect();
    vector.sort_by_key(|&(term_id, _)| term_id);

    let norm = vector.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut vector {
            *w /= norm;
        }
    }
    vector
}

/// Dot product of two sparse vectors with ascending columns.
fn sparse_dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let mut dot = 0.0f32;
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_tokenize_strips_punctuation_and_lowercases() {
        assert_eq!(
            tokenize("How do I register?!"),
            vec!["how", "do", "i", "register"]
        );
        assert_eq!(tokenize("  "), Vec::<String>::new());
    }

    #[test]
    fn test_empty_corpus_scores_nothing() {
        let index = TfidfIndex::build(&[]);
        assert_eq!(index.doc_count(), 0);
        assert!(index.score("anything").is_empty());
    }

    #[test]
    fn test_exact_question_match_scores_near_one() {
        let index = TfidfIndex::build(&corpus(&[
            "How do I register?",
            "What is the attendance policy?",
        ]));
        let scores = index.score("How do I register?");
        assert!(scores[0] > 0.999, "exact match scored {}", scores[0]);
        assert!(scores[0] > scores[1]);
    }

    #[test]
    fn test_no_vocabulary_overlap_scores_zero() {
        let index = TfidfIndex::build(&corpus(&["register online", "attendance policy"]));
        let scores = index.score("zebra quantum");
        assert_eq!(scores, vec![0.0, 0.0]);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let index = TfidfIndex::build(&corpus(&["register online"]));
        assert_eq!(index.score(""), vec![0.0]);
    }

    #[test]
    fn test_shared_term_ranks_matching_doc_higher() {
        let index = TfidfIndex::build(&corpus(&[
            "how to reset a password",
            "certificate download steps",
        ]));
        let scores = index.score("password reset");
        assert!(scores[0] > 0.0);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_rare_term_outweighs_common_term() {
        // "course" appears everywhere, "refund" in one document only.
        let index = TfidfIndex::build(&corpus(&[
            "course refund policy",
            "course schedule details",
            "course platform access",
        ]));
        let scores = index.score("refund");
        assert!(scores[0] > scores[1]);
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let docs = corpus(&[
            "How do I register?",
            "What is the attendance policy?",
            "How do I get my certificate?",
        ]);
        let a = TfidfIndex::build(&docs);
        let b = TfidfIndex::build(&docs);
        for query in ["register", "attendance certificate", "how do i"] {
            assert_eq!(a.score(query), b.score(query));
        }
    }

    #[test]
    fn test_scores_bounded() {
        let index = TfidfIndex::build(&corpus(&[
            "register register register",
            "register once",
        ]));
        for score in index.score("register register") {
            assert!((0.0..=1.0).contains(&score));
        }
    }
}
