//! TF-IDF term weighting over a per-call corpus

use crate::config::VectorizerConfig;
use crate::processing::similarity::cosine_similarity;
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};

/// Builds TF-IDF models. Holds options only, never a fitted vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    sublinear_tf: bool,
    smooth_idf: bool,
    token_regex: Regex,
}

/// Document-term weights for one corpus.
///
/// Rows follow the corpus order passed to `fit_transform` and are
/// L2-normalized; an all-zero row stays zero.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: BTreeMap<String, usize>,
    idf: Array1<f32>,
    matrix: Array2<f32>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::from_config(&VectorizerConfig::default())
    }

    pub fn from_config(config: &VectorizerConfig) -> Self {
        let token_regex = Regex::new(r"\b\w\w+\b").expect("Invalid token regex");

        Self {
            sublinear_tf: config.sublinear_tf,
            smooth_idf: config.smooth_idf,
            token_regex,
        }
    }

    /// Lowercase and split into tokens of two or more word characters
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Fit vocabulary and IDF on `documents` and weight every document
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfidfModel {
        let analyzed: Vec<Vec<String>> = documents
            .iter()
            .map(|d| self.analyze(d.as_ref()))
            .collect();

        let vocabulary: BTreeMap<String, usize> = analyzed
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        let n_documents = documents.len();
        let mut counts = Array2::<f32>::zeros((n_documents, vocabulary.len()));
        for (row, tokens) in analyzed.iter().enumerate() {
            for token in tokens {
                if let Some(&column) = vocabulary.get(token) {
                    counts[[row, column]] += 1.0;
                }
            }
        }

        let document_frequency = counts
            .mapv(|c| if c > 0.0 { 1.0f32 } else { 0.0 })
            .sum_axis(Axis(0));
        let idf = self.inverse_document_frequency(&document_frequency, n_documents);

        if self.sublinear_tf {
            counts.mapv_inplace(|c| if c > 0.0 { 1.0 + c.ln() } else { 0.0 });
        }

        let mut matrix = counts * &idf;
        for mut row in matrix.rows_mut() {
            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|x| x / norm);
            }
        }

        debug!(
            "Fitted TF-IDF model: {} documents, {} terms",
            n_documents,
            vocabulary.len()
        );

        TfidfModel {
            vocabulary,
            idf,
            matrix,
        }
    }

    fn inverse_document_frequency(
        &self,
        document_frequency: &Array1<f32>,
        n_documents: usize,
    ) -> Array1<f32> {
        let n = n_documents as f32;
        if self.smooth_idf {
            document_frequency.mapv(|df| ((1.0 + n) / (1.0 + df)).ln() + 1.0)
        } else {
            // Every vocabulary term occurs in at least one document
            document_frequency.mapv(|df| (n / df.max(1.0)).ln() + 1.0)
        }
    }
}

impl TfidfModel {
    pub fn document_count(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&index| self.idf[index])
    }

    /// Weight of `term` in document `row`, 0 for unknown terms
    pub fn weight(&self, row: usize, term: &str) -> f32 {
        self.vocabulary
            .get(term)
            .map(|&column| self.matrix[[row, column]])
            .unwrap_or(0.0)
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, f32> {
        self.matrix.row(index)
    }

    /// Clamped cosine similarity between two documents of the corpus
    pub fn similarity(&self, a: usize, b: usize) -> f32 {
        cosine_similarity(self.row(a), self.row(b))
    }

    /// Similarity of the `query` document to every other document, in corpus order
    pub fn similarities_to(&self, query: usize) -> Vec<(usize, f32)> {
        (0..self.document_count())
            .filter(|&index| index != query)
            .map(|index| (index, self.similarity(query, index)))
            .collect()
    }
}
