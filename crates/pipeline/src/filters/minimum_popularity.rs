//! Filter to ensure a minimum popularity.
//!
//! Keeps the genre rows from filling up with obscure titles.

use crate::context::FavoriteContext;
use crate::traits::Filter;
use data_loader::Item;

/// Removes candidates at or below a popularity floor.
///
/// The comparison is strict: an item exactly at the floor is dropped.
pub struct MinimumPopularityFilter {
    floor: f64,
}

impl MinimumPopularityFilter {
    /// Create a new MinimumPopularityFilter.
    ///
    /// # Arguments
    /// * `floor` - Popularity an item must exceed (typically 60)
    pub fn new(floor: f64) -> Self {
        Self { floor }
    }
}

impl Filter for MinimumPopularityFilter {
    fn name(&self) -> &str {
        "MinimumPopularityFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a Item>, _context: &FavoriteContext) -> Vec<&'a Item> {
        candidates
            .into_iter()
            .filter(|item| item.popularity > self.floor)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_popularity_filter() {
        let items: Vec<Item> = [(1, 59.9), (2, 60.0), (3, 60.1), (4, 500.0)]
            .into_iter()
            .map(|(id, popularity)| {
                let mut item = Item::new(id, "x");
                item.popularity = popularity;
                item
            })
            .collect();

        let filtered =
            MinimumPopularityFilter::new(60.0).apply(items.iter().collect(), &FavoriteContext::default());

        let ids: Vec<u32> = filtered.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
