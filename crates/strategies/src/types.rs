//! Result types shared by every strategy.

use data_loader::{CastMember, GenreId, Item, ItemId};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One recommended item, projected from the catalog.
///
/// `popularity` is only filled by the genre strategy and `shared_cast`
/// only by the cast strategy; both are omitted from JSON when absent.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Recommendation {
    pub id: ItemId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub vote_average: f64,
    /// Strategy-specific score: cosine similarity, shared-cast count, or
    /// `0.0` for fallback and genre rows
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_cast: Option<Vec<CastMember>>,
}

impl Recommendation {
    pub fn from_item(item: &Item, score: f64) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            overview: item.overview.clone(),
            poster_path: item.poster_path.clone(),
            vote_average: item.vote_average,
            score,
            popularity: None,
            shared_cast: None,
        }
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn with_shared_cast(mut self, shared_cast: Vec<CastMember>) -> Self {
        self.shared_cast = Some(shared_cast);
        self
    }
}

/// Ranked items for one genre
#[derive(Debug, Clone, PartialEq)]
pub struct GenreGroup {
    pub genre_id: GenreId,
    pub name: String,
    pub items: Vec<Recommendation>,
}

/// Genre display name -> ranked items, in favorite-genre rank order.
///
/// Behaves like a map keyed by name: inserting a name that already exists
/// replaces that group's items in place. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreRecommendations {
    groups: Vec<GenreGroup>,
}

impl GenreRecommendations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, genre_id: GenreId, name: String, items: Vec<Recommendation>) {
        match self.groups.iter_mut().find(|group| group.name == name) {
            Some(group) => {
                group.genre_id = genre_id;
                group.items = items;
            }
            None => self.groups.push(GenreGroup {
                genre_id,
                name,
                items,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[Recommendation]> {
        self.groups
            .iter()
            .find(|group| group.name == name)
            .map(|group| group.items.as_slice())
    }

    pub fn groups(&self) -> &[GenreGroup] {
        &self.groups
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for GenreRecommendations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_projection() {
        let mut item = Item::new(603, "Matrix");
        item.poster_path = Some("/m.jpg".to_string());
        item.vote_average = 8.2;

        let json = serde_json::to_value(Recommendation::from_item(&item, 0.5)).unwrap();
        assert_eq!(json["id"], 603);
        assert_eq!(json["poster_path"], "/m.jpg");
        assert!(json.get("popularity").is_none());
        assert!(json.get("shared_cast").is_none());

        let json = serde_json::to_value(
            Recommendation::from_item(&item, 2.0).with_shared_cast(vec![CastMember::new("Keanu Reeves")]),
        )
        .unwrap();
        assert_eq!(json["shared_cast"][0]["name"], "Keanu Reeves");
    }

    #[test]
    fn test_genre_recommendations_behave_like_a_map() {
        let mut groups = GenreRecommendations::new();
        let item = Item::new(1, "x");
        groups.insert(28, "Acción".to_string(), vec![]);
        groups.insert(12, "Aventura".to_string(), vec![Recommendation::from_item(&item, 0.0)]);
        groups.insert(99, "Acción".to_string(), vec![Recommendation::from_item(&item, 0.0)]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.names().collect::<Vec<_>>(), vec!["Acción", "Aventura"]);
        assert_eq!(groups.get("Acción").map(|items| items.len()), Some(1));
        assert!(groups.get("Drama").is_none());

        let json = serde_json::to_string(&groups).unwrap();
        assert!(json.starts_with(r#"{"Acción":[{"id":1"#));
    }
}
