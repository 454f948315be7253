//! Content Similarity - profile-based recommendations
//!
//! Recommends items whose combined feature vector (synopsis, genres, cast)
//! points in the same direction as the average of the user's favorites.
//!
//! ## Algorithm
//! 1. Resolve favorite ids to catalog rows; give up if none resolve
//! 2. Build the combined feature matrix over the whole catalog
//! 3. Profile = element-wise mean of the favorite rows
//! 4. Score every row by cosine similarity to the profile
//! 5. Stable sort by score descending (ties keep catalog order)
//! 6. Drop favorites, drop repeated ids (first wins), drop score <= threshold
//! 7. If nothing survives, fall back to the head of the catalog with score 0
//! 8. Keep the first `top_n`

use crate::types::Recommendation;
use data_loader::{Catalog, Favorite, Item};
use pipeline::{build_favorite_context, FavoriteContext, FeatureVectorizer, VectorizerConfig};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Number of recommendations returned by default
pub const DEFAULT_TOP_N: usize = 10;

/// Similarity an item must exceed to be recommended
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Content-similarity strategy.
#[derive(Debug, Clone)]
pub struct ContentStrategy {
    vectorizer: FeatureVectorizer,
    top_n: usize,
    threshold: f64,
}

impl ContentStrategy {
    pub fn new() -> Self {
        Self {
            vectorizer: FeatureVectorizer::default(),
            top_n: DEFAULT_TOP_N,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Configure the number of results (default: 10)
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Configure the similarity cutoff (default: 0.4)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Configure stopwords and other vectorizer settings
    pub fn with_vectorizer_config(mut self, config: VectorizerConfig) -> Self {
        self.vectorizer = FeatureVectorizer::new(config);
        self
    }

    /// Mean feature vector of the resolved favorites.
    ///
    /// `None` when no favorite is in the catalog.
    pub fn user_profile(&self, catalog: &Catalog, favorites: &[Favorite]) -> Option<Vec<f64>> {
        let context = build_favorite_context(catalog, favorites);
        if context.is_unresolved() {
            return None;
        }
        self.vectorizer
            .build_matrix(catalog)
            .profile(&context.positions)
    }

    /// Recommend items similar to the favorites
    #[instrument(skip_all, fields(favorites = favorites.len(), catalog = catalog.len()))]
    pub fn recommend(&self, catalog: &Catalog, favorites: &[Favorite]) -> Vec<Recommendation> {
        let context = build_favorite_context(catalog, favorites);
        if context.is_unresolved() {
            warn!("No favorites matched the catalog");
            return Vec::new();
        }
        debug!("Favorite rows in catalog: {:?}", context.positions);

        let matrix = self.vectorizer.build_matrix(catalog);
        let Some(profile) = matrix.profile(&context.positions) else {
            return Vec::new();
        };
        let scores = matrix.similarities(&profile);

        let mut ranked = self.rank(catalog.items(), &scores, &context);
        debug!("Found {} unique recommendations above threshold", ranked.len());

        if ranked.is_empty() {
            warn!("Not enough similar items; falling back to catalog order");
            ranked = fallback(catalog.items(), &context, self.top_n);
        }

        ranked
            .into_iter()
            .take(self.top_n)
            .map(|(item, score)| Recommendation::from_item(item, score))
            .collect()
    }

    /// Order rows by score and apply the exclusion rules
    fn rank<'a>(
        &self,
        items: &'a [Item],
        scores: &[f64],
        context: &FavoriteContext,
    ) -> Vec<(&'a Item, f64)> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        // sort_by is stable, so equal scores keep catalog order
        order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

        let mut seen = HashSet::new();
        order
            .into_iter()
            .filter_map(|position| {
                let item = &items[position];
                let score = scores[position];
                let keep = !context.is_favorite(item.id)
                    && score > self.threshold
                    && seen.insert(item.id);
                keep.then_some((item, score))
            })
            .collect()
    }
}

impl Default for ContentStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// First `limit` catalog items that are neither favorites nor repeats
fn fallback<'a>(items: &'a [Item], context: &FavoriteContext, limit: usize) -> Vec<(&'a Item, f64)> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| !context.is_favorite(item.id) && seen.insert(item.id))
        .take(limit)
        .map(|item| (item, 0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::CastMember;

    fn movie(id: u32, overview: &str, genres: &[u32], cast: &[&str]) -> Item {
        let mut item = Item::new(id, format!("Movie {}", id));
        item.overview = overview.to_string();
        item.genre_ids = genres.to_vec();
        item.cast = cast.iter().map(|name| CastMember::new(*name)).collect();
        item
    }

    fn create_test_catalog() -> Catalog {
        Catalog::new(vec![
            movie(1, "Un mago joven estudia en una escuela de magia", &[14, 12], &["Daniel Radcliffe", "Emma Watson"]),
            movie(2, "El mago vuelve a la escuela de magia", &[14, 12], &["Daniel Radcliffe", "Rupert Grint"]),
            movie(3, "Un detective investiga un crimen en Londres", &[80, 9648], &["Benedict Cumberbatch"]),
            movie(4, "Dos amigos abren un restaurante", &[35], &["Owen Wilson"]),
            movie(2, "El mago vuelve a la escuela de magia", &[14, 12], &["Daniel Radcliffe", "Rupert Grint"]),
        ])
    }

    #[test]
    fn test_recommend_ranks_similar_first() {
        let catalog = create_test_catalog();
        let recommendations = ContentStrategy::new().recommend(&catalog, &[Favorite::new(1)]);

        assert_eq!(recommendations.len(), 1, "Only the sequel clears the threshold");
        assert_eq!(recommendations[0].id, 2);
        assert!(recommendations[0].score > DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_recommend_excludes_favorites_and_duplicates() {
        let catalog = create_test_catalog();
        let recommendations = ContentStrategy::new()
            .with_threshold(-1.0)
            .recommend(&catalog, &[Favorite::new(1)]);

        let ids: Vec<u32> = recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&1));
        assert_eq!(ids.iter().filter(|&&id| id == 2).count(), 1);
        // Unrelated items tie at zero and keep catalog order
        assert_eq!(ids, vec![2, 3, 4]);
        for pair in recommendations.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_fallback_returns_catalog_head() {
        let catalog = create_test_catalog();
        let recommendations = ContentStrategy::new()
            .with_threshold(0.99)
            .with_top_n(2)
            .recommend(&catalog, &[Favorite::new(3)]);

        let ids: Vec<u32> = recommendations.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(recommendations.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_unknown_favorites_give_empty() {
        let catalog = create_test_catalog();
        let strategy = ContentStrategy::new();

        assert!(strategy.recommend(&catalog, &[Favorite::new(404)]).is_empty());
        assert!(strategy.recommend(&catalog, &[]).is_empty());
        assert!(strategy.user_profile(&catalog, &[]).is_none());
    }

    #[test]
    fn test_user_profile_is_mean_of_rows() {
        let catalog = create_test_catalog();
        let strategy = ContentStrategy::new();

        let profile = strategy
            .user_profile(&catalog, &[Favorite::new(1), Favorite::new(4)])
            .unwrap();
        let matrix = pipeline::build_feature_matrix(&catalog);
        assert_eq!(profile.len(), matrix.n_cols());

        let row_1 = matrix.matrix().row(0).to_dense(matrix.n_cols());
        let row_4 = matrix.matrix().row(3).to_dense(matrix.n_cols());
        for ((p, a), b) in profile.iter().zip(&row_1).zip(&row_4) {
            assert!((p - (a + b) / 2.0).abs() < 1e-12);
        }
    }
}
