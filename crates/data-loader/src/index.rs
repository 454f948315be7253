//! Catalog loading, validation and browse queries.
//!
//! This module builds the Catalog from the JSON dataset and answers the
//! simple catalog-only questions the front end asks (highlighted titles,
//! upcoming releases, title search). None of these touch favorites.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

impl Catalog {
    /// Load the catalog from a JSON dataset file.
    ///
    /// Steps:
    /// 1. Parse the JSON array into items
    /// 2. Build the id -> positions index
    /// 3. Validate numeric fields
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);

        let items = parser::parse_catalog(path)?;
        let catalog = Catalog::new(items);
        catalog.validate()?;

        let (rows, unique) = catalog.counts();
        if rows != unique {
            warn!(
                "Catalog contains {} duplicate rows ({} rows, {} distinct ids)",
                rows - unique,
                rows,
                unique
            );
        }
        info!("Loaded {} items", rows);
        Ok(catalog)
    }

    /// Build and validate a catalog from an in-memory JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog = Catalog::new(parser::parse_catalog_str(json, "<memory>")?);
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that popularity is a finite, non-negative number and that the
    /// vote average is finite.
    pub fn validate(&self) -> Result<()> {
        for item in &self.items {
            if !item.popularity.is_finite() || item.popularity < 0.0 {
                return Err(DataLoadError::InvalidValue {
                    field: format!("popularity (item {})", item.id),
                    value: item.popularity.to_string(),
                });
            }
            if !item.vote_average.is_finite() {
                return Err(DataLoadError::InvalidValue {
                    field: format!("vote_average (item {})", item.id),
                    value: item.vote_average.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Popular items in one language, most popular first.
    ///
    /// Keeps items with `popularity > min_popularity` whose original
    /// language equals `language`.
    pub fn highlighted(&self, min_popularity: f64, language: &str) -> Vec<&Item> {
        let mut highlighted: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| item.popularity > min_popularity && item.original_language == language)
            .collect();

        highlighted.sort_by(|a, b| {
            b.popularity
                .partial_cmp(&a.popularity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        highlighted
    }

    /// Items releasing strictly after `today`, soonest first.
    ///
    /// Duplicate ids collapse to one entry: the slot of the first
    /// occurrence holds the data of the last one.
    pub fn upcoming(&self, today: NaiveDate, limit: usize) -> Vec<&Item> {
        let mut slots: HashMap<ItemId, usize> = HashMap::new();
        let mut upcoming: Vec<&Item> = Vec::new();

        for item in &self.items {
            if !item.release_date.is_some_and(|date| date > today) {
                continue;
            }
            match slots.get(&item.id) {
                Some(&slot) => upcoming[slot] = item,
                None => {
                    slots.insert(item.id, upcoming.len());
                    upcoming.push(item);
                }
            }
        }

        upcoming.sort_by_key(|item| item.release_date);
        upcoming.truncate(limit);
        upcoming
    }

    /// Case-insensitive title search: exact matches first, then substrings
    pub fn search_title(&self, query: &str) -> Vec<&Item> {
        let query = query.to_lowercase();
        let mut matches: Vec<(u8, &Item)> = self
            .items
            .iter()
            .filter_map(|item| {
                let title = item.title.to_lowercase();
                if title == query {
                    Some((0, item))
                } else if title.contains(&query) {
                    Some((1, item))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by_key(|(relevance, _)| *relevance);
        matches.into_iter().map(|(_, item)| item).collect()
    }
}
