//! Filter on the item's original language.

use crate::context::FavoriteContext;
use crate::traits::Filter;
use data_loader::Item;

/// Keeps candidates whose `original_language` matches, ignoring case.
pub struct OriginalLanguageFilter {
    language: String,
}

impl OriginalLanguageFilter {
    /// # Arguments
    /// * `language` - ISO 639-1 code such as `"en"`
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into().to_lowercase(),
        }
    }
}

impl Filter for OriginalLanguageFilter {
    fn name(&self) -> &str {
        "OriginalLanguageFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a Item>, _context: &FavoriteContext) -> Vec<&'a Item> {
        candidates
            .into_iter()
            .filter(|item| item.original_language.to_lowercase() == self.language)
            .collect()
    }
}
