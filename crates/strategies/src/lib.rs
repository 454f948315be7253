//! Recommendation strategies for the content-based movie recommender.
//!
//! This crate provides four independent scorers over an in-memory catalog:
//! - ContentStrategy: cosine similarity to the favorites' mean feature vector
//! - CastStrategy: number of cast members shared with the favorites
//! - GenreStrategy: popular items grouped under the favorites' top genres
//! - CompatibilityScorer: similarity of one target item to the favorites
//!
//! Each strategy resolves the favorite list itself. Favorites missing from
//! the catalog are skipped; when none resolve, the strategy returns an empty
//! result (or `0.0` for compatibility) instead of an error.
//!
//! ## Example Usage
//! ```ignore
//! use strategies::{recommend, recommend_by_genre};
//!
//! let favorites = vec![Favorite::new(603), Favorite::new(604)];
//! let similar = recommend(&favorites, &catalog, 10);
//! let by_genre = recommend_by_genre(&favorites, &catalog, &GenreNames::default(), 16, 60.0);
//! ```

pub mod cast;
pub mod compatibility;
pub mod content;
pub mod genre;
pub mod types;

// Re-export main types
pub use cast::CastStrategy;
pub use compatibility::{CompatibilityScorer, INCOMPARABLE};
pub use content::ContentStrategy;
pub use genre::{top_genres, GenreStrategy};
pub use types::{GenreGroup, GenreRecommendations, Recommendation};

use data_loader::{Catalog, Favorite, GenreNames, ItemId};

// ============================================================================
// Convenience entry points with default settings
// ============================================================================

/// Content-similarity recommendations (threshold 0.4)
pub fn recommend(favorites: &[Favorite], catalog: &Catalog, top_n: usize) -> Vec<Recommendation> {
    ContentStrategy::new()
        .with_top_n(top_n)
        .recommend(catalog, favorites)
}

/// Items ranked by the number of cast members shared with the favorites
pub fn recommend_by_cast(
    favorites: &[Favorite],
    catalog: &Catalog,
    top_n: usize,
) -> Vec<Recommendation> {
    CastStrategy::new()
        .with_top_n(top_n)
        .recommend(catalog, favorites)
}

/// Popular English-language items grouped by the favorites' top 5 genres
pub fn recommend_by_genre(
    favorites: &[Favorite],
    catalog: &Catalog,
    names: &GenreNames,
    top_n: usize,
    popularity_floor: f64,
) -> GenreRecommendations {
    GenreStrategy::new()
        .with_top_n(top_n)
        .with_popularity_floor(popularity_floor)
        .recommend(catalog, favorites, names)
}

/// Cosine similarity of `target_id` to the favorites' profile, or `0.0`
pub fn compatibility(target_id: ItemId, favorites: &[Favorite], catalog: &Catalog) -> f64 {
    CompatibilityScorer::new().score(target_id, favorites, catalog)
}

/// Mean feature vector of the favorites found in the catalog
pub fn user_profile(favorites: &[Favorite], catalog: &Catalog) -> Option<Vec<f64>> {
    ContentStrategy::new().user_profile(catalog, favorites)
}
