use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i32,
    pub pos: i32,
    pub rank2023: i32,
    pub rank2022: i32,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub country: String,
    pub length: i32,
    pub genre: String,
    pub colour: String,
    // Alias lets the struct also decode the snake_case key produced by
    // to_jsonb() in the watchlist/favorite join queries.
    #[serde(alias = "is_favorite")]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovie {
    pub pos: i32,
    pub rank2023: i32,
    pub rank2022: i32,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub country: String,
    pub length: i32,
    pub genre: String,
    pub colour: String,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovie {
    pub pos: Option<i32>,
    pub rank2023: Option<i32>,
    pub rank2022: Option<i32>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub country: Option<String>,
    pub length: Option<i32>,
    pub genre: Option<String>,
    pub colour: Option<String>,
    pub is_favorite: Option<bool>,
}

impl UpdateMovie {
    pub fn is_empty(&self) -> bool {
        self.pos.is_none()
            && self.rank2023.is_none()
            && self.rank2022.is_none()
            && self.title.is_none()
            && self.director.is_none()
            && self.year.is_none()
            && self.country.is_none()
            && self.length.is_none()
            && self.genre.is_none()
            && self.colour.is_none()
            && self.is_favorite.is_none()
    }
}

/// Conjunctive equality criteria for `GET /movies/filter`. Absent or empty
/// values are omitted from the query entirely, never treated as "match none".
/// The `color` query key maps onto the `colour` column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieFilter {
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub country: Option<String>,
    pub color: Option<String>,
}

/// Accepts a number or a numeric string; an empty or unparseable value
/// counts as absent, the same as the other criteria. Query strings always
/// hand the value over as text.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_serializes_camel_case() {
        let movie = Movie {
            id: 1,
            pos: 2,
            rank2023: 3,
            rank2022: 4,
            title: "Vertigo".into(),
            director: "Alfred Hitchcock".into(),
            year: 1958,
            country: "USA".into(),
            length: 128,
            genre: "Thriller".into(),
            colour: "Colour".into(),
            is_favorite: true,
        };

        let value = serde_json::to_value(&movie).unwrap();
        assert_eq!(value["isFavorite"], serde_json::json!(true));
        assert_eq!(value["rank2023"], serde_json::json!(3));
        assert!(value.get("is_favorite").is_none());
    }

    #[test]
    fn test_movie_decodes_snake_case_alias() {
        // Shape produced by to_jsonb(m) in the list join queries.
        let movie: Movie = serde_json::from_value(serde_json::json!({
            "id": 1, "pos": 1, "rank2023": 1, "rank2022": 1,
            "title": "Tokyo Story", "director": "Yasujiro Ozu",
            "year": 1953, "country": "Japan", "length": 136,
            "genre": "Drama", "colour": "Black and White",
            "is_favorite": false
        }))
        .unwrap();

        assert!(!movie.is_favorite);
    }

    #[test]
    fn test_filter_empty_year_treated_as_absent() {
        let filter: MovieFilter =
            serde_json::from_value(serde_json::json!({ "year": "", "genre": "Drama" })).unwrap();
        assert_eq!(filter.year, None);
        assert_eq!(filter.genre.as_deref(), Some("Drama"));
    }

    #[test]
    fn test_filter_year_parses_from_text() {
        let filter: MovieFilter =
            serde_json::from_value(serde_json::json!({ "year": "1958" })).unwrap();
        assert_eq!(filter.year, Some(1958));

        let filter: MovieFilter =
            serde_json::from_value(serde_json::json!({ "year": "n/a" })).unwrap();
        assert_eq!(filter.year, None);
    }

    #[test]
    fn test_update_movie_is_empty() {
        assert!(UpdateMovie::default().is_empty());
        let partial = UpdateMovie {
            title: Some("New title".into()),
            ..Default::default()
        };
        assert!(!partial.is_empty());
    }
}
