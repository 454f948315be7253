//! Filter to remove items the user already marked as favorites.
//!
//! There's no point in recommending what the user just told us they like.

use crate::context::FavoriteContext;
use crate::traits::Filter;
use data_loader::Item;

/// Removes candidates whose id is in the favorite set.
///
/// ## Algorithm
/// Uses the HashSet in FavoriteContext.favorite_ids for O(1) lookups.
/// Unresolved favorite ids are in that set too.
pub struct ExcludeFavoritesFilter;

impl Filter for ExcludeFavoritesFilter {
    fn name(&self) -> &str {
        "ExcludeFavoritesFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a Item>, context: &FavoriteContext) -> Vec<&'a Item> {
        candidates
            .into_iter()
            .filter(|item| !context.is_favorite(item.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_exclude_favorites_filter() {
        let context = FavoriteContext {
            favorite_ids: HashSet::from([100, 200]),
            ..Default::default()
        };
        let items: Vec<Item> = [100, 101, 200, 300]
            .into_iter()
            .map(|id| Item::new(id, "x"))
            .collect();

        let filtered = ExcludeFavoritesFilter.apply(items.iter().collect(), &context);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 101);
        assert_eq!(filtered[1].id, 300);
    }
}
