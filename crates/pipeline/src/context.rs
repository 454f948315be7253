//! Resolution of a caller's favorite list against the catalog.
//!
//! This follows the "context builder" pattern: gather everything the
//! strategies need about the favorites once, then share it read-only.

use data_loader::{Catalog, Favorite, GenreId, ItemId};
use std::collections::HashSet;
use tracing::warn;

/// Favorites resolved against one catalog snapshot.
#[derive(Debug, Clone, Default)]
pub struct FavoriteContext {
    /// Every supplied id, resolved or not. Nothing in this set is ever
    /// recommended back.
    pub favorite_ids: HashSet<ItemId>,
    /// Catalog positions (matrix rows) of resolved favorites, ascending.
    /// An id stored at several positions contributes all of them.
    pub positions: Vec<usize>,
    /// Distinct resolved ids, in the order the caller listed them
    pub resolved: Vec<ItemId>,
    /// Distinct ids missing from the catalog, in the order listed
    pub unresolved: Vec<ItemId>,
    /// Genre ids of resolved favorites with repetitions, in listing order.
    /// A favorite's own `genre_ids` win over the catalog's copy.
    pub genre_ids: Vec<GenreId>,
}

impl FavoriteContext {
    /// True when no favorite could be found in the catalog
    pub fn is_unresolved(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_favorite(&self, id: ItemId) -> bool {
        self.favorite_ids.contains(&id)
    }
}

/// Build a FavoriteContext for `favorites` over `catalog`.
///
/// Unknown ids are skipped with a warning, never treated as an error.
pub fn build_favorite_context(catalog: &Catalog, favorites: &[Favorite]) -> FavoriteContext {
    let mut context = FavoriteContext::default();
    let mut seen: HashSet<ItemId> = HashSet::new();

    for favorite in favorites {
        context.favorite_ids.insert(favorite.id);
        if !seen.insert(favorite.id) {
            continue;
        }

        match catalog.find(favorite.id) {
            Some(item) => {
                context.resolved.push(favorite.id);
                context.positions.extend_from_slice(catalog.positions_of(favorite.id));
                let genres = favorite.genre_ids.as_deref().unwrap_or(&item.genre_ids);
                context.genre_ids.extend_from_slice(genres);
            }
            None => context.unresolved.push(favorite.id),
        }
    }
    context.positions.sort_unstable();

    if !context.unresolved.is_empty() {
        warn!(
            "{} favorite(s) not found in catalog: {:?}",
            context.unresolved.len(),
            context.unresolved
        );
    }
    context
}
