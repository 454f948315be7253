//! Term frequency / inverse document frequency vectorizer.
//!
//! ## Algorithm
//! 1. Tokenize every document and drop stopwords
//! 2. Vocabulary = all remaining distinct terms, sorted; one column each
//! 3. idf(t) = ln((1 + n_docs) / (1 + df(t))) + 1
//! 4. Row value = raw count of t in the document * idf(t)
//! 5. Each row is scaled to unit L2 norm (empty rows stay all-zero)
//!
//! Fitting over zero documents, or over documents that contain no usable
//! terms, yields a zero-column matrix instead of an error.

use crate::matrix::SparseMatrix;
use crate::text::{tokenize, StopWords};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Fitted vocabulary and idf weights
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    columns: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    /// Column assigned to a term, if it was seen during fitting
    pub fn column(&self, term: &str) -> Option<usize> {
        self.columns.get(term).copied()
    }

    pub fn idf(&self, column: usize) -> f64 {
        self.idf[column]
    }
}

/// TF-IDF vectorizer with a configurable stopword list.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    stop_words: StopWords,
}

impl TfidfVectorizer {
    pub fn new(stop_words: StopWords) -> Self {
        Self { stop_words }
    }

    /// Tokenize and drop stopwords
    fn analyze(&self, document: &str) -> Vec<String> {
        tokenize(document)
            .into_iter()
            .filter(|term| !self.stop_words.contains(term))
            .collect()
    }

    /// Learn the vocabulary and idf weights from a corpus
    pub fn fit<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Vocabulary {
        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.analyze(doc.as_ref()))
            .collect();
        build_vocabulary(&analyzed)
    }

    /// Fit on `documents` and return their weighted rows, one per document
    pub fn fit_transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> (Vocabulary, SparseMatrix) {
        let analyzed: Vec<Vec<String>> = documents
            .par_iter()
            .map(|doc| self.analyze(doc.as_ref()))
            .collect();
        let vocabulary = build_vocabulary(&analyzed);

        let rows: Vec<Vec<(usize, f64)>> = analyzed
            .par_iter()
            .map(|terms| weigh(&vocabulary, terms))
            .collect();

        let matrix = SparseMatrix::from_rows(vocabulary.len(), rows);
        (vocabulary, matrix)
    }

    /// Weigh new documents against an already fitted vocabulary.
    ///
    /// Terms missing from the vocabulary contribute nothing.
    pub fn transform<S: AsRef<str> + Sync>(&self, vocabulary: &Vocabulary, documents: &[S]) -> SparseMatrix {
        let rows: Vec<Vec<(usize, f64)>> = documents
            .par_iter()
            .map(|doc| weigh(vocabulary, &self.analyze(doc.as_ref())))
            .collect();
        SparseMatrix::from_rows(vocabulary.len(), rows)
    }
}

fn build_vocabulary(analyzed: &[Vec<String>]) -> Vocabulary {
    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for terms in analyzed {
        let unique: BTreeSet<&str> = terms.iter().map(String::as_str).collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    let mut terms: Vec<&str> = document_frequency.keys().copied().collect();
    terms.sort_unstable();

    let n_docs = analyzed.len() as f64;
    let idf = terms
        .iter()
        .map(|term| {
            let df = document_frequency[term] as f64;
            ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
        })
        .collect();
    let columns = terms
        .into_iter()
        .enumerate()
        .map(|(column, term)| (term.to_string(), column))
        .collect();

    Vocabulary { columns, idf }
}

/// Count known terms, multiply by idf, L2-normalize
fn weigh(vocabulary: &Vocabulary, terms: &[String]) -> Vec<(usize, f64)> {
    let mut counts: HashMap<usize, f64> = HashMap::new();
    for term in terms {
        if let Some(column) = vocabulary.column(term) {
            *counts.entry(column).or_insert(0.0) += 1.0;
        }
    }

    let mut row: Vec<(usize, f64)> = counts
        .into_iter()
        .map(|(column, tf)| (column, tf * vocabulary.idf(column)))
        .collect();

    let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        row.iter_mut().for_each(|(_, v)| *v /= norm);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_is_sorted_and_filtered() {
        let vectorizer = TfidfVectorizer::new(StopWords::from_words(["el", "de"]));
        let vocabulary = vectorizer.fit(&["el robot de metal", "robot solitario"]);

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.column("metal"), Some(0));
        assert_eq!(vocabulary.column("robot"), Some(1));
        assert_eq!(vocabulary.column("solitario"), Some(2));
        assert_eq!(vocabulary.column("el"), None);
    }

    #[test]
    fn test_idf_is_smoothed() {
        let vectorizer = TfidfVectorizer::default();
        let vocabulary = vectorizer.fit(&["robot metal", "robot"]);

        // robot appears in both documents: ln(3/3) + 1
        let robot = vocabulary.column("robot").unwrap();
        assert!((vocabulary.idf(robot) - 1.0).abs() < 1e-12);
        // metal appears in one: ln(3/2) + 1
        let metal = vocabulary.column("metal").unwrap();
        assert!((vocabulary.idf(metal) - (1.5f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let vectorizer = TfidfVectorizer::default();
        let (_, matrix) = vectorizer.fit_transform(&["robot robot metal", "", "espacio"]);

        assert_eq!(matrix.n_rows(), 3);
        assert!((matrix.row(0).norm() - 1.0).abs() < 1e-12);
        assert_eq!(matrix.row(1).norm(), 0.0);
        assert!((matrix.row(2).norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_corpus_does_not_fail() {
        let vectorizer = TfidfVectorizer::new(StopWords::spanish());

        let (vocabulary, matrix) = vectorizer.fit_transform(&["", "de la", "y"]);
        assert!(vocabulary.is_empty());
        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.n_cols(), 0);

        let empty: [&str; 0] = [];
        let (vocabulary, matrix) = vectorizer.fit_transform(&empty);
        assert!(vocabulary.is_empty());
        assert_eq!(matrix.n_rows(), 0);
    }

    #[test]
    fn test_transform_ignores_unknown_terms() {
        let vectorizer = TfidfVectorizer::default();
        let vocabulary = vectorizer.fit(&["robot metal"]);

        let matrix = vectorizer.transform(&vocabulary, &["dragón", "robot dragón"]);
        assert_eq!(matrix.row(0).norm(), 0.0);
        assert_eq!(matrix.row(1).indices, &[vocabulary.column("robot").unwrap()]);
    }
}
