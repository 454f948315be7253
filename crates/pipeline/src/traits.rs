//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate sets.

use crate::context::FavoriteContext;
use data_loader::Item;

/// Core trait for filtering candidate items.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Candidates are borrowed from the catalog; filters only drop
///   references and never clone items
/// - Filters preserve the relative order of the candidates they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership of the Vec)
    /// * `context` - The resolved favorites of the current request
    fn apply<'a>(&self, candidates: Vec<&'a Item>, context: &FavoriteContext) -> Vec<&'a Item>;
}
