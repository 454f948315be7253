//! Feature pipeline for content-based movie recommendations.
//!
//! This crate provides:
//! - Tokenizer, stopword lists and a TF-IDF vectorizer
//! - FeatureVectorizer: text, genre and cast blocks per catalog item
//! - FeatureMatrix: the combined sparse matrix with profile/cosine helpers
//! - FavoriteContext: a favorite list resolved against the catalog
//! - Filter trait and implementations, composed by FilterPipeline
//!
//! ## Architecture
//! 1. The catalog is vectorized into three row-aligned blocks
//! 2. The blocks are concatenated into one FeatureMatrix
//! 3. Strategies average favorite rows into a profile and score every row
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_favorite_context, build_feature_matrix};
//!
//! let context = build_favorite_context(&catalog, &favorites);
//! let matrix = build_feature_matrix(&catalog);
//! let profile = matrix.profile(&context.positions).unwrap();
//! let scores = matrix.similarities(&profile);
//! ```

pub mod context;
pub mod features;
pub mod filter_pipeline;
pub mod filters;
pub mod matrix;
pub mod text;
pub mod tfidf;
pub mod traits;

// Re-export main types
pub use context::{build_favorite_context, FavoriteContext};
pub use features::{
    build_feature_matrix, FeatureBlocks, FeatureMatrix, FeatureVectorizer, GenreBinarizer,
    VectorizerConfig,
};
pub use filter_pipeline::FilterPipeline;
pub use matrix::SparseMatrix;
pub use text::{tokenize, StopWords};
pub use tfidf::{TfidfVectorizer, Vocabulary};
pub use traits::Filter;
