//! Filter to keep only items tagged with one genre.

use crate::context::FavoriteContext;
use crate::traits::Filter;
use data_loader::{GenreId, Item};

/// Keeps candidates whose `genre_ids` contain `genre_id`.
pub struct GenreMatchFilter {
    genre_id: GenreId,
}

impl GenreMatchFilter {
    pub fn new(genre_id: GenreId) -> Self {
        Self { genre_id }
    }
}

impl Filter for GenreMatchFilter {
    fn name(&self) -> &str {
        "GenreMatchFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a Item>, _context: &FavoriteContext) -> Vec<&'a Item> {
        candidates
            .into_iter()
            .filter(|item| item.genre_ids.contains(&self.genre_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_match_filter() {
        let mut action = Item::new(1, "Action");
        action.genre_ids = vec![28, 12];
        let mut drama = Item::new(2, "Drama");
        drama.genre_ids = vec![18];
        let untagged = Item::new(3, "Untagged");

        let candidates = vec![&action, &drama, &untagged];
        let filtered = GenreMatchFilter::new(12).apply(candidates, &FavoriteContext::default());

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }
}
