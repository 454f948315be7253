//! Feature vectorization of the catalog.
//!
//! Every item is described by three independent blocks of columns:
//! - **text**: TF-IDF over the synopsis corpus, stopwords removed
//! - **genres**: multi-hot over every genre id seen in the catalog
//! - **cast**: TF-IDF over the "cast names joined by spaces" corpus
//!
//! The blocks are concatenated into one `FeatureMatrix` whose row `i` is
//! catalog position `i`. The matrix is a pure function of the catalog and
//! is rebuilt per request; column identity is not stable across catalogs.

use crate::matrix::SparseMatrix;
use crate::text::StopWords;
use crate::tfidf::TfidfVectorizer;
use data_loader::{Catalog, GenreId};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Vectorizer settings.
///
/// Defaults: Spanish stopwords for synopses, no stopwords for cast names.
#[derive(Debug, Clone)]
pub struct VectorizerConfig {
    pub text_stop_words: StopWords,
    pub cast_stop_words: StopWords,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            text_stop_words: StopWords::spanish(),
            cast_stop_words: StopWords::none(),
        }
    }
}

impl VectorizerConfig {
    /// Replace the synopsis stopword list
    pub fn with_text_stop_words(mut self, stop_words: StopWords) -> Self {
        self.text_stop_words = stop_words;
        self
    }
}

/// Multi-hot encoder over genre ids.
///
/// One column per distinct id observed, in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct GenreBinarizer {
    classes: Vec<GenreId>,
}

impl GenreBinarizer {
    pub fn fit<'a, I>(genre_lists: I) -> Self
    where
        I: IntoIterator<Item = &'a [GenreId]>,
    {
        let classes: BTreeSet<GenreId> = genre_lists.into_iter().flatten().copied().collect();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    pub fn classes(&self) -> &[GenreId] {
        &self.classes
    }

    /// Encode lists; ids not among the fitted classes are ignored
    pub fn transform<'a, I>(&self, genre_lists: I) -> SparseMatrix
    where
        I: IntoIterator<Item = &'a [GenreId]>,
    {
        let column_of: HashMap<GenreId, usize> = self
            .classes
            .iter()
            .enumerate()
            .map(|(column, &id)| (id, column))
            .collect();

        let rows = genre_lists
            .into_iter()
            .map(|ids| {
                let columns: BTreeSet<usize> =
                    ids.iter().filter_map(|id| column_of.get(id).copied()).collect();
                columns.into_iter().map(|column| (column, 1.0)).collect()
            })
            .collect();

        SparseMatrix::from_rows(self.classes.len(), rows)
    }
}

/// The three row-aligned feature blocks of a catalog
#[derive(Debug, Clone)]
pub struct FeatureBlocks {
    pub text: SparseMatrix,
    pub genres: SparseMatrix,
    pub cast: SparseMatrix,
    /// Genre id behind each column of `genres`
    pub genre_classes: Vec<GenreId>,
}

impl FeatureBlocks {
    /// Concatenate text | genres | cast into one matrix
    pub fn combine(&self) -> FeatureMatrix {
        FeatureMatrix {
            matrix: SparseMatrix::hstack(&[&self.text, &self.genres, &self.cast]),
            text_width: self.text.n_cols(),
            genre_width: self.genres.n_cols(),
            cast_width: self.cast.n_cols(),
        }
    }
}

/// Turns a catalog into feature blocks.
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorizer {
    config: VectorizerConfig,
}

impl FeatureVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self { config }
    }

    /// Vectorize every item of the catalog.
    ///
    /// The three blocks are independent, so they are fitted in parallel
    /// with nested `rayon::join`.
    pub fn vectorize(&self, catalog: &Catalog) -> FeatureBlocks {
        let items = catalog.items();

        let ((text, genres), cast) = rayon::join(
            || {
                rayon::join(
                    || {
                        let overviews: Vec<&str> =
                            items.iter().map(|item| item.overview.as_str()).collect();
                        TfidfVectorizer::new(self.config.text_stop_words.clone())
                            .fit_transform(&overviews)
                    },
                    || {
                        let binarizer =
                            GenreBinarizer::fit(items.iter().map(|item| item.genre_ids.as_slice()));
                        let matrix =
                            binarizer.transform(items.iter().map(|item| item.genre_ids.as_slice()));
                        (binarizer, matrix)
                    },
                )
            },
            || {
                let casts: Vec<String> = items.iter().map(|item| item.cast_document()).collect();
                TfidfVectorizer::new(self.config.cast_stop_words.clone()).fit_transform(&casts)
            },
        );

        let (text_vocabulary, text) = text;
        let (binarizer, genres) = genres;
        let (cast_vocabulary, cast) = cast;
        debug!(
            "Vectorized {} items: {} text terms, {} genres, {} cast terms",
            items.len(),
            text_vocabulary.len(),
            binarizer.classes().len(),
            cast_vocabulary.len()
        );

        FeatureBlocks {
            text,
            genres,
            cast,
            genre_classes: binarizer.classes().to_vec(),
        }
    }

    /// Vectorize and concatenate in one step
    pub fn build_matrix(&self, catalog: &Catalog) -> FeatureMatrix {
        self.vectorize(catalog).combine()
    }
}

/// Build the combined feature matrix with default settings
pub fn build_feature_matrix(catalog: &Catalog) -> FeatureMatrix {
    FeatureVectorizer::default().build_matrix(catalog)
}

/// Combined feature matrix: one row per catalog position.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    matrix: SparseMatrix,
    text_width: usize,
    genre_width: usize,
    cast_width: usize,
}

impl FeatureMatrix {
    pub fn matrix(&self) -> &SparseMatrix {
        &self.matrix
    }

    pub fn n_rows(&self) -> usize {
        self.matrix.n_rows()
    }

    pub fn n_cols(&self) -> usize {
        self.matrix.n_cols()
    }

    /// Column widths of the (text, genres, cast) blocks
    pub fn block_widths(&self) -> (usize, usize, usize) {
        (self.text_width, self.genre_width, self.cast_width)
    }

    /// Mean of the given rows; `None` when `rows` is empty
    pub fn profile(&self, rows: &[usize]) -> Option<Vec<f64>> {
        self.matrix.mean_of_rows(rows)
    }

    /// Cosine similarity of `profile` against every row
    pub fn similarities(&self, profile: &[f64]) -> Vec<f64> {
        self.matrix.cosine_similarities(profile)
    }

    /// Cosine similarity of `profile` against one row
    pub fn similarity(&self, profile: &[f64], row: usize) -> f64 {
        self.matrix.cosine_with_row(profile, row)
    }
}
