//! Compatibility - how well one item fits a favorite list

use data_loader::{Catalog, Favorite, ItemId};
use pipeline::{build_favorite_context, FeatureVectorizer, VectorizerConfig};
use tracing::{debug, instrument, warn};

/// Returned when the favorites or the target cannot be found
pub const INCOMPARABLE: f64 = 0.0;

/// Cosine similarity between a favorites profile and one target item.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityScorer {
    vectorizer: FeatureVectorizer,
}

impl CompatibilityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vectorizer_config(mut self, config: VectorizerConfig) -> Self {
        self.vectorizer = FeatureVectorizer::new(config);
        self
    }

    /// Score `target_id` against the mean of the favorites' rows.
    ///
    /// Returns [`INCOMPARABLE`] when no favorite or no target row is found.
    /// A target stored at several rows is scored at its first one.
    #[instrument(skip(self, favorites, catalog), fields(favorites = favorites.len()))]
    pub fn score(&self, target_id: ItemId, favorites: &[Favorite], catalog: &Catalog) -> f64 {
        let context = build_favorite_context(catalog, favorites);
        let Some(target_row) = catalog.first_position(target_id) else {
            warn!("Target {} not found in catalog", target_id);
            return INCOMPARABLE;
        };
        if context.is_unresolved() {
            warn!("No favorites matched the catalog");
            return INCOMPARABLE;
        }

        let matrix = self.vectorizer.build_matrix(catalog);
        let Some(profile) = matrix.profile(&context.positions) else {
            return INCOMPARABLE;
        };
        let score = matrix.similarity(&profile, target_row);
        debug!("Compatibility of {}: {:.3}", target_id, score);
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CastMember, Item};

    fn movie(id: u32, overview: &str, genres: &[u32], cast: &[&str]) -> Item {
        let mut item = Item::new(id, format!("Movie {}", id));
        item.overview = overview.to_string();
        item.genre_ids = genres.to_vec();
        item.cast = cast.iter().map(|name| CastMember::new(*name)).collect();
        item
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            movie(1, "Piratas buscan un tesoro perdido", &[12, 14], &["Johnny Depp"]),
            movie(2, "Piratas navegan hacia una isla", &[12], &["Orlando Bloom"]),
            movie(3, "Una abogada defiende a su cliente", &[18], &["Julia Roberts"]),
        ])
    }

    #[test]
    fn test_self_compatibility() {
        let scorer = CompatibilityScorer::new();
        let score = scorer.score(1, &[Favorite::new(1)], &catalog());
        assert!((score - 1.0).abs() < 1e-6, "got {}", score);
    }

    #[test]
    fn test_related_beats_unrelated() {
        let scorer = CompatibilityScorer::new();
        let catalog = catalog();
        let related = scorer.score(2, &[Favorite::new(1)], &catalog);
        let unrelated = scorer.score(3, &[Favorite::new(1)], &catalog);
        assert!(related > unrelated);
        assert!(unrelated.abs() < 1e-12);
    }

    #[test]
    fn test_sentinel() {
        let scorer = CompatibilityScorer::new();
        let catalog = catalog();
        assert_eq!(scorer.score(99, &[Favorite::new(1)], &catalog), INCOMPARABLE);
        assert_eq!(scorer.score(1, &[Favorite::new(99)], &catalog), INCOMPARABLE);
        assert_eq!(scorer.score(1, &[], &catalog), INCOMPARABLE);
        assert_eq!(scorer.score(1, &[], &Catalog::default()), INCOMPARABLE);
    }
}
