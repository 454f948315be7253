//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::context::FavoriteContext;
use crate::traits::Filter;
use data_loader::Item;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenreMatchFilter::new(28))
///     .add_filter(ExcludeFavoritesFilter)
///     .add_filter(MinimumPopularityFilter::new(60.0));
///
/// let kept = pipeline.apply(catalog.items().iter().collect(), &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the candidates.
    pub fn apply<'a>(&self, candidates: Vec<&'a Item>, context: &FavoriteContext) -> Vec<&'a Item> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context);
            debug!(
                "Filter {}: {} -> {} candidates",
                filter.name(),
                before,
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{ExcludeFavoritesFilter, MinimumPopularityFilter};
    use std::collections::HashSet;

    fn items() -> Vec<Item> {
        (1..=3)
            .map(|id| {
                let mut item = Item::new(id, format!("Movie {}", id));
                item.popularity = id as f64 * 40.0;
                item
            })
            .collect()
    }

    #[test]
    fn test_empty_pipeline() {
        let items = items();
        let pipeline = FilterPipeline::new();
        let context = FavoriteContext::default();

        let filtered = pipeline.apply(items.iter().collect(), &context);
        assert_eq!(filtered.len(), 3);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_chained_filters() {
        let items = items();
        let context = FavoriteContext {
            favorite_ids: HashSet::from([3]),
            ..Default::default()
        };

        let pipeline = FilterPipeline::new()
            .add_filter(ExcludeFavoritesFilter)
            .add_filter(MinimumPopularityFilter::new(60.0));

        let filtered = pipeline.apply(items.iter().collect(), &context);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }
}
