//! Core domain types for the movie catalog.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (ItemId, GenreId)
//! - Serde attributes for tolerant JSON decoding
//! - HashMap index alongside an ordered Vec (an arena of items)

use crate::parser::{null_as_default, release_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a catalog item (TMDB movie id)
pub type ItemId = u32;

/// Identifier of a content category (TMDB genre id)
pub type GenreId = u32;

/// Upper bound on the number of cast entries kept per item
pub const MAX_CAST_PER_ITEM: usize = 10;

// =============================================================================
// Item-related Types
// =============================================================================

/// One credited cast member of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Profile image reference, if the catalog has one
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl CastMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            profile_path: None,
        }
    }
}

/// Represents a movie in the catalog.
///
/// Only `id` is mandatory in the JSON source. Every other field falls back
/// to a neutral default (empty text, empty list, zero) so downstream
/// vectorization never has to deal with missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Free-text synopsis, possibly empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    /// Category tags of this item
    #[serde(default, alias = "tag_ids", deserialize_with = "null_as_default")]
    pub genre_ids: Vec<GenreId>,
    /// Credited cast in billing order
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original_language: String,
    /// `None` when the source omits the date or leaves it blank
    #[serde(default, deserialize_with = "release_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl Item {
    /// Create an item with only an id and a title; everything else empty.
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            genre_ids: Vec::new(),
            cast: Vec::new(),
            popularity: 0.0,
            vote_average: 0.0,
            original_language: String::new(),
            release_date: None,
            poster_path: None,
        }
    }

    /// Cast names joined by spaces, in billing order
    pub fn cast_document(&self) -> String {
        self.cast
            .iter()
            .map(|member| member.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =============================================================================
// Favorites
// =============================================================================

/// A caller-supplied reference to an item the user likes.
///
/// The id may point at an item that is no longer in the catalog; callers
/// skip those rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: ItemId,
    /// Genre ids as the client knows them; optional
    #[serde(default, alias = "tag_ids")]
    pub genre_ids: Option<Vec<GenreId>>,
    #[serde(default)]
    pub title: Option<String>,
}

impl Favorite {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            genre_ids: None,
            title: None,
        }
    }

    pub fn with_genres(id: ItemId, genre_ids: Vec<GenreId>) -> Self {
        Self {
            id,
            genre_ids: Some(genre_ids),
            title: None,
        }
    }
}

// =============================================================================
// Catalog - The Core In-Memory Store
// =============================================================================

/// Ordered, immutable set of items loaded once per process.
///
/// Items live in a `Vec` so that position `i` is row `i` of every feature
/// matrix built from the catalog. A secondary `HashMap` maps each id to all
/// the positions it occupies; ids are expected to be unique but duplicates
/// are tolerated and treated as the same item.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) items: Vec<Item>,
    pub(crate) positions: HashMap<ItemId, Vec<usize>>,
}

impl Catalog {
    /// Build a catalog from items in their original order
    pub fn new(items: Vec<Item>) -> Self {
        let mut positions: HashMap<ItemId, Vec<usize>> = HashMap::new();
        for (position, item) in items.iter().enumerate() {
            positions.entry(item.id).or_default().push(position);
        }
        Self { items, positions }
    }

    /// All items in catalog order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at a catalog position (matrix row)
    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    /// Every position holding `id`, in catalog order.
    ///
    /// Returns an empty slice for unknown ids.
    pub fn positions_of(&self, id: ItemId) -> &[usize] {
        self.positions
            .get(&id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// First position holding `id`
    pub fn first_position(&self, id: ItemId) -> Option<usize> {
        self.positions_of(id).first().copied()
    }

    /// First item with this id
    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.first_position(id).map(|position| &self.items[position])
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.positions.contains_key(&id)
    }

    /// (item rows, distinct ids)
    pub fn counts(&self) -> (usize, usize) {
        (self.items.len(), self.positions.len())
    }
}

impl From<Vec<Item>> for Catalog {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}
