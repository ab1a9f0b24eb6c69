use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

use crate::database::models::CreateMovie;
use crate::database::repositories::MovieRepository;
use crate::error::ApiError;

/// Bulk-loads the movie table from a CSV export. Rows that fail to parse or
/// persist are skipped and logged; the load never aborts part-way.
pub struct SeedService {
    movies: MovieRepository,
    file_path: PathBuf,
}

/// Raw CSV row. Numeric cells are kept as text so a malformed number can
/// default to 0 instead of rejecting the row.
#[derive(Debug, Deserialize)]
struct SeedRow {
    #[serde(rename = "Pos", default)]
    pos: String,
    #[serde(rename = "2023", default)]
    rank2023: String,
    #[serde(rename = "2022", default)]
    rank2022: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Country", default)]
    country: String,
    #[serde(rename = "Length", default)]
    length: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Colour", default)]
    colour: String,
}

impl SeedRow {
    fn into_movie(self) -> CreateMovie {
        CreateMovie {
            pos: int_or_zero(&self.pos),
            rank2023: int_or_zero(&self.rank2023),
            rank2022: int_or_zero(&self.rank2022),
            title: self.title,
            director: self.director,
            year: int_or_zero(&self.year),
            country: self.country,
            length: int_or_zero(&self.length),
            genre: self.genre,
            colour: self.colour,
            is_favorite: false,
        }
    }
}

fn int_or_zero(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

impl SeedService {
    pub fn new(movies: MovieRepository, file_path: PathBuf) -> Self {
        Self { movies, file_path }
    }

    /// Returns the number of rows inserted.
    pub async fn seed_from_csv(&self) -> Result<usize, ApiError> {
        let path = self.file_path.clone();

        // The file can be arbitrarily large; keep the read and parse off
        // the runtime threads.
        let rows = tokio::task::spawn_blocking(move || {
            let file = std::fs::File::open(&path)
                .map_err(|e| format!("failed to open seed file {}: {e}", path.display()))?;
            Ok::<_, String>(parse_rows(file))
        })
        .await
        .map_err(|e| ApiError::Internal(format!("seed load task failed: {e}")))?
        .map_err(ApiError::Internal)?;

        let mut inserted = 0;
        for row in rows {
            match self.movies.insert(&row).await {
                Ok(_) => inserted += 1,
                Err(e) => tracing::warn!("skipping seed row \"{}\": {e}", row.title),
            }
        }

        tracing::info!("seeded {inserted} movies from {}", self.file_path.display());
        Ok(inserted)
    }
}

fn parse_rows<R: Read>(input: R) -> Vec<CreateMovie> {
    let mut reader = csv::Reader::from_reader(input);
    let mut rows = Vec::new();
    for result in reader.deserialize::<SeedRow>() {
        match result {
            Ok(row) => rows.push(row.into_movie()),
            Err(e) => tracing::warn!("skipping malformed seed row: {e}"),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Pos,2023,2022,Title,Director,Year,Country,Length,Genre,Colour
1,1,2,Vertigo,Alfred Hitchcock,1958,USA,128,Thriller,Colour
2,n/a,3,Tokyo Story,Yasujiro Ozu,1953,Japan,136,Drama,Black and White
";

    #[test]
    fn test_parse_rows_maps_columns() {
        let rows = parse_rows(SAMPLE.as_bytes());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].pos, 1);
        assert_eq!(rows[0].rank2022, 2);
        assert_eq!(rows[0].title, "Vertigo");
        assert_eq!(rows[0].director, "Alfred Hitchcock");
        assert_eq!(rows[0].year, 1958);
        assert!(!rows[0].is_favorite);
    }

    #[test]
    fn test_unparseable_numbers_default_to_zero() {
        let rows = parse_rows(SAMPLE.as_bytes());
        assert_eq!(rows[1].rank2023, 0);
        assert_eq!(rows[1].length, 136);
    }

    fn unreachable_repository() -> MovieRepository {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(100))
            .connect_lazy("postgres://localhost:1/unreachable")
            .unwrap();
        MovieRepository::new(pool)
    }

    #[tokio::test]
    async fn test_seed_missing_file_is_an_error() {
        let service = SeedService::new(
            unreachable_repository(),
            PathBuf::from("/nonexistent/movies.csv"),
        );
        assert!(service.seed_from_csv().await.is_err());
    }

    #[tokio::test]
    async fn test_seed_survives_rows_that_fail_to_persist() {
        let path = std::env::temp_dir().join("cinescope-seed-unreachable.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        // Every insert fails against the unreachable database; the load
        // still completes, skipping each row.
        let service = SeedService::new(unreachable_repository(), path.clone());
        assert_eq!(service.seed_from_csv().await.unwrap(), 0);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_short_rows_are_skipped_not_fatal() {
        let input = "\
Pos,2023,2022,Title,Director,Year,Country,Length,Genre,Colour
1,1,1,Vertigo,Alfred Hitchcock,1958,USA,128,Thriller,Colour
2,2
3,3,3,Tokyo Story,Yasujiro Ozu,1953,Japan,136,Drama,Black and White
";
        let rows = parse_rows(input.as_bytes());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].title, "Tokyo Story");
    }
}
