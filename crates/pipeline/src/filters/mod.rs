//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod exclude_favorites;
pub mod genre_match;
pub mod minimum_popularity;
pub mod original_language;

// Re-export for convenience
pub use exclude_favorites::ExcludeFavoritesFilter;
pub use genre_match::GenreMatchFilter;
pub use minimum_popularity::MinimumPopularityFilter;
pub use original_language::OriginalLanguageFilter;
