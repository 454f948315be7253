//! Shared Cast - "more movies with the actors you like"
//!
//! ## Algorithm
//! 1. Collect the cast of every favorite found in the catalog
//! 2. Count how often each name appears (only logged, never used to rank)
//! 3. For each other item, score = number of distinct cast names it shares
//!    with the favorites' combined cast
//! 4. Drop items sharing nobody, sort by score descending (stable)
//! 5. Keep the first `top_n`, each carrying the matching cast entries

use crate::types::Recommendation;
use data_loader::{Catalog, CastMember, Favorite, Item};
use pipeline::{build_favorite_context, FavoriteContext};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, warn};

/// Number of recommendations returned by default
pub const DEFAULT_TOP_N: usize = 10;

/// Shared-cast strategy.
#[derive(Debug, Clone)]
pub struct CastStrategy {
    top_n: usize,
}

impl CastStrategy {
    pub fn new() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Configure the number of results (default: 10)
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Recommend items sharing cast members with the favorites
    #[instrument(skip_all, fields(favorites = favorites.len()))]
    pub fn recommend(&self, catalog: &Catalog, favorites: &[Favorite]) -> Vec<Recommendation> {
        let context = build_favorite_context(catalog, favorites);

        let favorite_cast: Vec<&CastMember> = context
            .resolved
            .iter()
            .filter_map(|&id| catalog.find(id))
            .flat_map(|item| item.cast.iter())
            .collect();

        if favorite_cast.is_empty() {
            warn!("No cast found among the favorites");
            return Vec::new();
        }

        let occurrences = count_names(&favorite_cast);
        debug!("Favorite cast occurrences: {:?}", occurrences);

        let names: HashSet<&str> = favorite_cast.iter().map(|member| member.name.as_str()).collect();
        let mut scored = score_items(catalog.items(), &names, &context);

        // sort_by is stable, so equal counts keep catalog order
        scored.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        scored.truncate(self.top_n);
        debug!("Generated {} cast recommendations", scored.len());

        scored
            .into_iter()
            .map(|(item, shared)| {
                Recommendation::from_item(item, shared.len() as f64).with_shared_cast(shared)
            })
            .collect()
    }
}

impl Default for CastStrategy {
    fn default() -> Self {
        Self::new()
    }
}

/// Occurrences per name, most frequent first, ties in order of appearance
fn count_names<'a>(cast: &[&'a CastMember]) -> Vec<(&'a str, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for member in cast {
        let name = member.name.as_str();
        match slots.get(name) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(name, counts.len());
                counts.push((name, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Shared cast entries of every eligible item; items sharing nobody are
/// skipped. Each id is scored once, at its first eligible occurrence.
fn score_items<'a>(
    items: &'a [Item],
    names: &HashSet<&str>,
    context: &FavoriteContext,
) -> Vec<(&'a Item, Vec<CastMember>)> {
    let mut processed = HashSet::new();
    let mut scored = Vec::new();

    for item in items {
        if context.is_favorite(item.id) || processed.contains(&item.id) {
            continue;
        }

        let mut matched: HashSet<&str> = HashSet::new();
        let shared: Vec<CastMember> = item
            .cast
            .iter()
            .filter(|member| names.contains(member.name.as_str()))
            .filter(|member| matched.insert(member.name.as_str()))
            .cloned()
            .collect();

        if !shared.is_empty() {
            processed.insert(item.id);
            scored.push((item, shared));
        }
    }
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32, cast: &[&str]) -> Item {
        let mut item = Item::new(id, format!("Movie {}", id));
        item.cast = cast.iter().map(|name| CastMember::new(*name)).collect();
        item
    }

    #[test]
    fn test_three_item_scenario() {
        let mut a = movie(1, &["X"]);
        a.genre_ids = vec![1, 2];
        let mut b = movie(2, &["X", "Y"]);
        b.genre_ids = vec![2];
        let mut c = movie(3, &["Z"]);
        c.genre_ids = vec![3];
        let catalog = Catalog::new(vec![a, b, c]);

        let recommendations = CastStrategy::new().recommend(&catalog, &[Favorite::new(1)]);

        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].id, 2);
        assert_eq!(recommendations[0].score, 1.0);
        let shared = recommendations[0].shared_cast.as_ref().unwrap();
        assert_eq!(shared, &vec![CastMember::new("X")]);
    }

    #[test]
    fn test_ranks_by_shared_count() {
        let catalog = Catalog::new(vec![
            movie(1, &["Ana", "Luis", "Marta"]),
            movie(2, &["Ana", "Pedro"]),
            movie(3, &["Ana", "Luis", "Pedro"]),
            movie(4, &["Marta"]),
            movie(3, &["Ana", "Luis", "Marta"]),
        ]);

        let recommendations = CastStrategy::new().recommend(&catalog, &[Favorite::new(1)]);
        let ranked: Vec<(u32, f64)> = recommendations.iter().map(|r| (r.id, r.score)).collect();

        // 3 shares two names; 2 and 4 tie on one and keep catalog order;
        // the duplicate row of 3 is skipped
        assert_eq!(ranked, vec![(3, 2.0), (2, 1.0), (4, 1.0)]);
    }

    #[test]
    fn test_repeated_name_counts_once() {
        let catalog = Catalog::new(vec![movie(1, &["Ana"]), movie(2, &["Ana", "Ana", "Bea"])]);

        let recommendations = CastStrategy::new().recommend(&catalog, &[Favorite::new(1)]);
        assert_eq!(recommendations[0].score, 1.0);
        assert_eq!(recommendations[0].shared_cast.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_favorites_without_cast() {
        let catalog = Catalog::new(vec![movie(1, &[]), movie(2, &["Ana"])]);
        let strategy = CastStrategy::new();

        assert!(strategy.recommend(&catalog, &[Favorite::new(1)]).is_empty());
        assert!(strategy.recommend(&catalog, &[Favorite::new(77)]).is_empty());
        assert!(strategy.recommend(&catalog, &[]).is_empty());
    }

    #[test]
    fn test_count_names() {
        let cast = [CastMember::new("B"), CastMember::new("A"), CastMember::new("A")];
        let refs: Vec<&CastMember> = cast.iter().collect();
        assert_eq!(count_names(&refs), vec![("A", 2), ("B", 1)]);
    }

    #[test]
    fn test_top_n() {
        let catalog = Catalog::new(vec![movie(1, &["Ana"]), movie(2, &["Ana"]), movie(3, &["Ana"])]);
        let recommendations = CastStrategy::new()
            .with_top_n(1)
            .recommend(&catalog, &[Favorite::new(1)]);
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].id, 2);
    }
}
