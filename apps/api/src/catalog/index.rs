//! TF-IDF index over the catalog's normalized skill text.
//!
//! Weighting: raw term count × smoothed IDF `ln((1 + n) / (1 + df)) + 1`,
//! every row L2-normalized so cosine similarity is a plain dot product.
//! Tokens are runs of two or more word characters with English stop words removed.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::stopwords::is_stop_word;
use crate::catalog::CatalogEntry;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex")
});

/// Sparse, L2-normalized term-weight vector keyed by vocabulary column.
/// Ordered so every sum runs in column order and identical rows score identically.
pub type SparseVector = BTreeMap<usize, f64>;

#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl SimilarityIndex {
    /// Builds the index with one row per entry, in catalog order.
    pub fn build(entries: &[CatalogEntry]) -> Self {
        let documents: Vec<Vec<String>> = entries
            .iter()
            .map(|e| tokenize(&e.skills_normalized))
            .collect();

        // Sorted vocabulary keeps column assignment independent of hash order.
        let mut terms: Vec<&str> = documents
            .iter()
            .flat_map(|doc| doc.iter().map(String::as_str))
            .collect();
        terms.sort_unstable();
        terms.dedup();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.to_string(), column))
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in &documents {
            let mut seen: Vec<usize> = doc.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            seen.sort_unstable();
            seen.dedup();
            for column in seen {
                document_frequency[column] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(documents.len()),
        };
        index.rows = documents.iter().map(|doc| index.weigh(doc)).collect();
        index
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Projects free text into the catalog vocabulary. Unknown terms are dropped.
    pub fn vectorize(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(&normalize_query(text)))
    }

    /// Cosine similarity of `query` against every row, in catalog order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        self.rows.iter().map(|row| dot(query, row)).collect()
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {
        let mut counts = SparseVector::new();
        for token in tokens {
            if let Some(&column) = self.vocabulary.get(token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }
        for (column, weight) in counts.iter_mut() {
            *weight *= self.idf[*column];
        }
        let norm = counts.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in counts.values_mut() {
                *weight /= norm;
            }
        }
        counts
    }
}

/// Picks the row with the highest similarity, first in catalog order on ties.
///
/// A zero vector (empty or fully out-of-vocabulary text) scores 0.0 everywhere
/// and therefore resolves to row 0. Returns `None` only for an empty index.
pub fn match_best_entry(index: &SimilarityIndex, job_description: &str) -> Option<(usize, f64)> {
    let query = index.vectorize(job_description);
    let mut best: Option<(usize, f64)> = None;
    for (i, score) in index.similarities(&query).into_iter().enumerate() {
        let score = if score.is_finite() { score } else { 0.0 };
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

/// Lowercases and collapses all runs of whitespace into single spaces.
pub fn normalize_query(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(String::from)
        .collect()
}

/// Walks `query` in column order, so the summation order depends only on the query.
fn dot(query: &SparseVector, row: &SparseVector) -> f64 {
    query
        .iter()
        .filter_map(|(column, wq)| row.get(column).map(|wr| wq * wr))
        .sum()
}
