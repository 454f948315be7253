//! # Recommendation Service
//!
//! Owns one catalog snapshot and answers recommendation requests against it:
//! 1. Reject empty favorite lists
//! 2. Run the strategy on the blocking pool (matrix builds are CPU-bound)
//! 3. Log timing and result sizes
//!
//! `recommend_all` runs the three strategies concurrently with
//! `tokio::join!`, one blocking task each.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use data_loader::{Catalog, Favorite, GenreNames, Item, ItemId};
use pipeline::VectorizerConfig;
use strategies::{
    CastStrategy, CompatibilityScorer, ContentStrategy, GenreRecommendations, GenreStrategy,
    Recommendation, INCOMPARABLE,
};

use crate::error::{Result, ServiceError};

/// Popularity an item must exceed to be highlighted
pub const HIGHLIGHT_POPULARITY: f64 = 25.0;

/// Language of highlighted items
pub const HIGHLIGHT_LANGUAGE: &str = "en";

/// Number of upcoming releases listed
pub const UPCOMING_LIMIT: usize = 20;

/// Output of all three strategies for one favorite list
#[derive(Debug, Clone, Default)]
pub struct RecommendationSet {
    pub similar: Vec<Recommendation>,
    pub by_cast: Vec<Recommendation>,
    pub by_genre: GenreRecommendations,
}

/// Shared, cheaply clonable entry point to every strategy
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    genre_names: Arc<GenreNames>,
    content: ContentStrategy,
    cast: CastStrategy,
    genre: GenreStrategy,
    compatibility: CompatibilityScorer,
}

impl RecommendationService {
    /// Create a service with default strategy settings
    pub fn new(catalog: Arc<Catalog>, genre_names: Arc<GenreNames>) -> Self {
        info!(
            "Recommendation service ready: {} catalog rows, {} genre names",
            catalog.len(),
            genre_names.len()
        );
        Self {
            catalog,
            genre_names,
            content: ContentStrategy::new(),
            cast: CastStrategy::new(),
            genre: GenreStrategy::new(),
            compatibility: CompatibilityScorer::new(),
        }
    }

    pub fn with_content_strategy(mut self, content: ContentStrategy) -> Self {
        self.content = content;
        self
    }

    pub fn with_cast_strategy(mut self, cast: CastStrategy) -> Self {
        self.cast = cast;
        self
    }

    pub fn with_genre_strategy(mut self, genre: GenreStrategy) -> Self {
        self.genre = genre;
        self
    }

    /// Apply one vectorizer configuration to both matrix-based scorers
    pub fn with_vectorizer_config(mut self, config: VectorizerConfig) -> Self {
        self.content = self.content.with_vectorizer_config(config.clone());
        self.compatibility = self.compatibility.with_vectorizer_config(config);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Content-similarity recommendations
    #[instrument(skip(self, favorites), fields(favorites = favorites.len()))]
    pub async fn recommend(&self, favorites: Vec<Favorite>) -> Result<Vec<Recommendation>> {
        ensure_favorites(&favorites)?;
        let start = Instant::now();

        let catalog = self.catalog.clone();
        let content = self.content.clone();
        let recommendations =
            tokio::task::spawn_blocking(move || content.recommend(&catalog, &favorites)).await?;

        info!(
            "Generated {} content recommendations in {:.2?}",
            recommendations.len(),
            start.elapsed()
        );
        Ok(recommendations)
    }

    /// Shared-cast recommendations
    #[instrument(skip(self, favorites), fields(favorites = favorites.len()))]
    pub async fn recommend_by_cast(&self, favorites: Vec<Favorite>) -> Result<Vec<Recommendation>> {
        ensure_favorites(&favorites)?;
        let start = Instant::now();

        let catalog = self.catalog.clone();
        let cast = self.cast.clone();
        let recommendations =
            tokio::task::spawn_blocking(move || cast.recommend(&catalog, &favorites)).await?;

        info!(
            "Generated {} cast recommendations in {:.2?}",
            recommendations.len(),
            start.elapsed()
        );
        Ok(recommendations)
    }

    /// Shared-genre groups
    #[instrument(skip(self, favorites), fields(favorites = favorites.len()))]
    pub async fn recommend_by_genre(&self, favorites: Vec<Favorite>) -> Result<GenreRecommendations> {
        ensure_favorites(&favorites)?;
        let start = Instant::now();

        let catalog = self.catalog.clone();
        let names = self.genre_names.clone();
        let genre = self.genre.clone();
        let groups =
            tokio::task::spawn_blocking(move || genre.recommend(&catalog, &favorites, &names))
                .await?;

        info!(
            "Generated {} genre groups in {:.2?}",
            groups.len(),
            start.elapsed()
        );
        Ok(groups)
    }

    /// Run all three strategies concurrently
    #[instrument(skip(self, favorites), fields(favorites = favorites.len()))]
    pub async fn recommend_all(&self, favorites: Vec<Favorite>) -> Result<RecommendationSet> {
        ensure_favorites(&favorites)?;
        let start = Instant::now();
        let favorites = Arc::new(favorites);

        let (similar, by_cast, by_genre) = tokio::join!(
            tokio::task::spawn_blocking({
                let catalog = self.catalog.clone();
                let favorites = favorites.clone();
                let content = self.content.clone();
                move || content.recommend(&catalog, &favorites)
            }),
            tokio::task::spawn_blocking({
                let catalog = self.catalog.clone();
                let favorites = favorites.clone();
                let cast = self.cast.clone();
                move || cast.recommend(&catalog, &favorites)
            }),
            tokio::task::spawn_blocking({
                let catalog = self.catalog.clone();
                let names = self.genre_names.clone();
                let favorites = favorites.clone();
                let genre = self.genre.clone();
                move || genre.recommend(&catalog, &favorites, &names)
            })
        );

        let set = RecommendationSet {
            similar: similar?,
            by_cast: by_cast?,
            by_genre: by_genre?,
        };
        info!(
            "Generated similar={}, by_cast={}, genre_groups={} in {:.2?}",
            set.similar.len(),
            set.by_cast.len(),
            set.by_genre.len(),
            start.elapsed()
        );
        Ok(set)
    }

    /// Compatibility of `target_id` with the favorites.
    ///
    /// An empty favorite list scores [`INCOMPARABLE`] rather than failing.
    #[instrument(skip(self, favorites), fields(favorites = favorites.len()))]
    pub async fn compatibility(&self, target_id: ItemId, favorites: Vec<Favorite>) -> Result<f64> {
        if favorites.is_empty() {
            warn!("Compatibility requested without favorites");
            return Ok(INCOMPARABLE);
        }

        let catalog = self.catalog.clone();
        let scorer = self.compatibility.clone();
        let score =
            tokio::task::spawn_blocking(move || scorer.score(target_id, &favorites, &catalog))
                .await?;
        Ok(score)
    }

    /// Popular English-language items, most popular first
    pub fn highlighted(&self) -> Vec<Item> {
        self.catalog
            .highlighted(HIGHLIGHT_POPULARITY, HIGHLIGHT_LANGUAGE)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Items released after `today`, soonest first
    pub fn upcoming(&self, today: NaiveDate) -> Vec<Item> {
        self.catalog
            .upcoming(today, UPCOMING_LIMIT)
            .into_iter()
            .cloned()
            .collect()
    }
}

fn ensure_favorites(favorites: &[Favorite]) -> Result<()> {
    if favorites.is_empty() {
        warn!("Request rejected: no favorites");
        return Err(ServiceError::NoFavorites);
    }
    Ok(())
}
