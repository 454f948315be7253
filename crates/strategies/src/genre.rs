//! Shared Genre - "more of the genres you watch most"
//!
//! ## Algorithm
//! 1. Gather the genre ids of every favorite found in the catalog
//!    (repetitions kept, so frequent genres weigh more)
//! 2. Pick the 5 most frequent ids; ties keep first-seen order
//! 3. For each picked genre, run the catalog through a FilterPipeline:
//!    genre match -> not a favorite -> popularity floor -> language
//! 4. Drop repeated ids (first wins), sort by vote_average descending
//!    (stable), keep the first `top_n`
//! 5. Group the lists under each genre's display name
//!
//! Groups are computed independently: one item can show up under several
//! genres.

use crate::types::{GenreRecommendations, Recommendation};
use data_loader::{Catalog, Favorite, GenreId, GenreNames, Item};
use pipeline::filters::{
    ExcludeFavoritesFilter, GenreMatchFilter, MinimumPopularityFilter, OriginalLanguageFilter,
};
use pipeline::{build_favorite_context, FavoriteContext, FilterPipeline};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// Items returned per genre by default
pub const DEFAULT_TOP_N: usize = 16;

/// Popularity an item must exceed to be listed
pub const DEFAULT_POPULARITY_FLOOR: f64 = 60.0;

/// Required original language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Maximum number of genre groups
pub const DEFAULT_MAX_GROUPS: usize = 5;

/// Shared-genre strategy.
#[derive(Debug, Clone)]
pub struct GenreStrategy {
    top_n: usize,
    popularity_floor: f64,
    language: String,
    max_groups: usize,
}

impl GenreStrategy {
    pub fn new() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            popularity_floor: DEFAULT_POPULARITY_FLOOR,
            language: DEFAULT_LANGUAGE.to_string(),
            max_groups: DEFAULT_MAX_GROUPS,
        }
    }

    /// Configure items per genre (default: 16)
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Configure the exclusive popularity floor (default: 60.0)
    pub fn with_popularity_floor(mut self, floor: f64) -> Self {
        self.popularity_floor = floor;
        self
    }

    /// Configure the required original language (default: "en")
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Configure the number of genre groups (default: 5)
    pub fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = max_groups;
        self
    }

    /// Group popular, well-rated items under the favorites' top genres
    #[instrument(skip_all, fields(favorites = favorites.len()))]
    pub fn recommend(
        &self,
        catalog: &Catalog,
        favorites: &[Favorite],
        names: &GenreNames,
    ) -> GenreRecommendations {
        let context = build_favorite_context(catalog, favorites);
        let mut result = GenreRecommendations::new();

        if context.genre_ids.is_empty() {
            warn!("Favorites carry no genres");
            return result;
        }

        let top = top_genres(&context.genre_ids, self.max_groups);
        debug!("Top favorite genres: {:?}", top);

        for genre_id in top {
            let items = self.rank_genre(catalog, genre_id, &context);
            let name = names.resolve(genre_id);
            debug!("Genre {} ({}): {} items", genre_id, name, items.len());
            result.insert(genre_id, name, items);
        }
        result
    }

    fn pipeline(&self, genre_id: GenreId) -> FilterPipeline {
        FilterPipeline::new()
            .add_filter(GenreMatchFilter::new(genre_id))
            .add_filter(ExcludeFavoritesFilter)
            .add_filter(MinimumPopularityFilter::new(self.popularity_floor))
            .add_filter(OriginalLanguageFilter::new(self.language.clone()))
    }

    fn rank_genre(
        &self,
        catalog: &Catalog,
        genre_id: GenreId,
        context: &FavoriteContext,
    ) -> Vec<Recommendation> {
        let candidates = self
            .pipeline(genre_id)
            .apply(catalog.items().iter().collect(), context);

        let mut seen = HashSet::new();
        let mut unique: Vec<&Item> = candidates
            .into_iter()
            .filter(|item| seen.insert(item.id))
            .collect();

        unique.sort_by(|a, b| {
            b.vote_average
                .partial_cmp(&a.vote_average)
                .unwrap_or(Ordering::Equal)
        });
        unique.truncate(self.top_n);

        unique
            .into_iter()
            .map(|item| Recommendation::from_item(item, 0.0).with_popularity(item.popularity))
            .collect()
    }
}

impl Default for GenreStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// The `n` most frequent distinct ids, ties broken by first appearance
pub fn top_genres(genre_ids: &[GenreId], n: usize) -> Vec<GenreId> {
    let mut slots: HashMap<GenreId, usize> = HashMap::new();
    let mut counts: Vec<(GenreId, usize)> = Vec::new();
    for &id in genre_ids {
        match slots.get(&id) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(id, counts.len());
                counts.push((id, 1));
            }
        }
    }
    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(id, _)| id).collect()
}
