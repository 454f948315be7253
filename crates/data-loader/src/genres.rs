//! Genre id -> display name resolution.
//!
//! The table is explicit configuration handed to whoever needs it rather
//! than a process-wide global. Lookups never fail: unknown ids resolve to a
//! generated placeholder.

use crate::error::Result;
use crate::parser;
use crate::types::GenreId;
use std::collections::HashMap;
use std::path::Path;

/// TMDB movie genres as served for the `es-ES` locale
const TMDB_GENRES_ES: &[(GenreId, &str)] = &[
    (28, "Acción"),
    (12, "Aventura"),
    (16, "Animación"),
    (35, "Comedia"),
    (80, "Crimen"),
    (99, "Documental"),
    (18, "Drama"),
    (10751, "Familia"),
    (14, "Fantasía"),
    (36, "Historia"),
    (27, "Terror"),
    (10402, "Música"),
    (9648, "Misterio"),
    (10749, "Romance"),
    (878, "Ciencia ficción"),
    (10770, "Película de TV"),
    (53, "Suspense"),
    (10752, "Bélica"),
    (37, "Western"),
];

/// Lookup table from genre id to display name.
///
/// Keys are kept as strings because the JSON source keys its object by the
/// id's decimal text.
#[derive(Debug, Clone)]
pub struct GenreNames {
    names: HashMap<String, String>,
}

impl GenreNames {
    /// An empty table; every lookup yields the placeholder
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
        }
    }

    pub fn from_map(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Load a `{"28": "Acción", ...}` JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Ok(Self::from_map(parser::parse_genre_names(path)?))
    }

    /// Display name for a genre id, or `"Género {id}"` when unknown
    pub fn resolve(&self, id: GenreId) -> String {
        self.names
            .get(&id.to_string())
            .cloned()
            .unwrap_or_else(|| placeholder(id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Defaults to the TMDB Spanish genre list
impl Default for GenreNames {
    fn default() -> Self {
        Self::from_map(
            TMDB_GENRES_ES
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        )
    }
}

fn placeholder(id: GenreId) -> String {
    format!("Género {}", id)
}
