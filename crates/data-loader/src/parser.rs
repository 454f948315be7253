//! Parser for the JSON catalog and genre-name files.
//!
//! - movies_dataset.json: array of TMDB movie objects with an embedded `cast`
//! - tmdb_genres.json: object mapping genre id (as string) to display name
//!
//! Decoding is tolerant: `null` and missing optional fields become their
//! defaults. Only structural problems (not an array, an item without `id`)
//! are reported as errors.

use crate::error::{DataLoadError, Result};
use crate::types::{Item, MAX_CAST_PER_ITEM};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Read a whole file to a String, mapping a missing file to `FileNotFound`
fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse the catalog file at `path`
pub fn parse_catalog(path: &Path) -> Result<Vec<Item>> {
    let content = read_to_string(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_catalog_str(&content, &file)
}

/// Parse a catalog from an in-memory JSON document.
///
/// `source` only names the document in error messages.
pub fn parse_catalog_str(json: &str, source: &str) -> Result<Vec<Item>> {
    let mut items: Vec<Item> =
        serde_json::from_str(json).map_err(|e| DataLoadError::JsonError {
            file: source.to_string(),
            source: e,
        })?;

    for item in &mut items {
        if item.cast.len() > MAX_CAST_PER_ITEM {
            debug!(
                "Truncating cast of item {} from {} to {} entries",
                item.id,
                item.cast.len(),
                MAX_CAST_PER_ITEM
            );
            item.cast.truncate(MAX_CAST_PER_ITEM);
        }
    }
    Ok(items)
}

/// Parse the genre-name file at `path`
///
/// Format: `{"28": "Acción", "12": "Aventura", ...}`
pub fn parse_genre_names(path: &Path) -> Result<HashMap<String, String>> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| DataLoadError::JsonError {
        file: path.display().to_string(),
        source: e,
    })
}

/// Deserialize `null` as `T::default()`
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a `YYYY-MM-DD` date; blank or unparseable values become `None`
pub(crate) fn release_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_release_date))
}

/// Parse a TMDB release date
///
/// Example: "2024-03-01" -> Some(2024-03-01)
///          "" -> None
fn parse_release_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release_date() {
        assert_eq!(
            parse_release_date("1999-03-31"),
            NaiveDate::from_ymd_opt(1999, 3, 31)
        );
        assert_eq!(parse_release_date(""), None);
        assert_eq!(parse_release_date("soon"), None);
    }

    #[test]
    fn test_parse_catalog_defaults_missing_fields() {
        let json = r#"[
            {"id": 1, "title": "Full", "overview": "Un robot", "genre_ids": [28, 878],
             "cast": [{"name": "Ana", "profile_path": "/a.jpg"}],
             "popularity": 80.5, "vote_average": 7.1, "original_language": "en",
             "release_date": "2020-01-01", "poster_path": "/p.jpg"},
            {"id": 2, "title": "Sparse", "overview": null, "release_date": ""}
        ]"#;

        let items = parse_catalog_str(json, "inline").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].genre_ids, vec![28, 878]);
        assert_eq!(items[0].cast[0].profile_path.as_deref(), Some("/a.jpg"));
        assert_eq!(items[1].overview, "");
        assert!(items[1].cast.is_empty());
        assert!(items[1].genre_ids.is_empty());
        assert_eq!(items[1].release_date, None);
        assert_eq!(items[1].popularity, 0.0);
    }

    #[test]
    fn test_null_scores_default_to_zero() {
        let json = r#"[{"id": 1, "title": "A", "popularity": null, "vote_average": null}]"#;

        let items = parse_catalog_str(json, "inline").unwrap();
        assert_eq!(items[0].popularity, 0.0);
        assert_eq!(items[0].vote_average, 0.0);
    }

    #[test]
    fn test_item_without_id_is_fatal() {
        let json = r#"[{"title": "No id"}]"#;
        let result = parse_catalog_str(json, "inline");
        assert!(matches!(result, Err(DataLoadError::JsonError { .. })));
    }

    #[test]
    fn test_cast_is_capped() {
        let cast: Vec<String> = (0..15)
            .map(|i| format!(r#"{{"name": "Actor {}"}}"#, i))
            .collect();
        let json = format!(r#"[{{"id": 7, "cast": [{}]}}]"#, cast.join(","));

        let items = parse_catalog_str(&json, "inline").unwrap();
        assert_eq!(items[0].cast.len(), MAX_CAST_PER_ITEM);
        assert_eq!(items[0].cast[0].name, "Actor 0");
    }

    #[test]
    fn test_missing_file() {
        let result = parse_catalog(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
