use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::database::models::{CreateMovie, Movie, MovieFilter, UpdateMovie};

const MOVIE_COLUMNS: &str =
    "id, pos, rank2023, rank2022, title, director, year, country, length, genre, colour, is_favorite";

#[derive(Debug, Clone)]
pub struct MovieRepository {
    pool: PgPool,
}

impl MovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Movie>, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, movie: &CreateMovie) -> Result<Movie, sqlx::Error> {
        sqlx::query_as::<_, Movie>(&format!(
            "INSERT INTO movies \
             (pos, rank2023, rank2022, title, director, year, country, length, genre, colour, is_favorite) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {MOVIE_COLUMNS}"
        ))
        .bind(movie.pos)
        .bind(movie.rank2023)
        .bind(movie.rank2022)
        .bind(&movie.title)
        .bind(&movie.director)
        .bind(movie.year)
        .bind(&movie.country)
        .bind(movie.length)
        .bind(&movie.genre)
        .bind(&movie.colour)
        .bind(movie.is_favorite)
        .fetch_one(&self.pool)
        .await
    }

    /// Applies only the provided fields and returns the updated row, or
    /// `None` when no row matches the id.
    pub async fn update(
        &self,
        id: i32,
        changes: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE movies SET ");
        {
            let mut sets = qb.separated(", ");
            if let Some(pos) = changes.pos {
                sets.push("pos = ").push_bind_unseparated(pos);
            }
            if let Some(rank2023) = changes.rank2023 {
                sets.push("rank2023 = ").push_bind_unseparated(rank2023);
            }
            if let Some(rank2022) = changes.rank2022 {
                sets.push("rank2022 = ").push_bind_unseparated(rank2022);
            }
            if let Some(title) = &changes.title {
                sets.push("title = ").push_bind_unseparated(title.clone());
            }
            if let Some(director) = &changes.director {
                sets.push("director = ").push_bind_unseparated(director.clone());
            }
            if let Some(year) = changes.year {
                sets.push("year = ").push_bind_unseparated(year);
            }
            if let Some(country) = &changes.country {
                sets.push("country = ").push_bind_unseparated(country.clone());
            }
            if let Some(length) = changes.length {
                sets.push("length = ").push_bind_unseparated(length);
            }
            if let Some(genre) = &changes.genre {
                sets.push("genre = ").push_bind_unseparated(genre.clone());
            }
            if let Some(colour) = &changes.colour {
                sets.push("colour = ").push_bind_unseparated(colour.clone());
            }
            if let Some(is_favorite) = changes.is_favorite {
                sets.push("is_favorite = ").push_bind_unseparated(is_favorite);
            }
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        qb.push(format!(" RETURNING {MOVIE_COLUMNS}"));

        qb.build_query_as::<Movie>()
            .fetch_optional(&self.pool)
            .await
    }

    /// Returns true when a row was deleted.
    pub async fn delete(&self, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring match against title OR director.
    pub async fn search(&self, term: &str) -> Result<Vec<Movie>, sqlx::Error> {
        let pattern = format!("%{term}%");
        sqlx::query_as::<_, Movie>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE title ILIKE $1 OR director ILIKE $1"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn filter(&self, criteria: &MovieFilter) -> Result<Vec<Movie>, sqlx::Error> {
        build_filter_query(criteria)
            .build_query_as::<Movie>()
            .fetch_all(&self.pool)
            .await
    }
}

/// Builds the conjunctive equality query for `filter`. Criteria that are
/// absent, zero, or empty are omitted entirely.
fn build_filter_query(criteria: &MovieFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<'static, Postgres> =
        QueryBuilder::new(format!("SELECT {MOVIE_COLUMNS} FROM movies"));
    let mut has_where = false;

    fn connective(qb: &mut QueryBuilder<'static, Postgres>, has_where: &mut bool) {
        qb.push(if *has_where { " AND " } else { " WHERE " });
        *has_where = true;
    }

    if let Some(year) = criteria.year.filter(|y| *y != 0) {
        connective(&mut qb, &mut has_where);
        qb.push("year = ");
        qb.push_bind(year);
    }
    if let Some(genre) = non_empty(&criteria.genre) {
        connective(&mut qb, &mut has_where);
        qb.push("genre = ");
        qb.push_bind(genre.to_string());
    }
    if let Some(country) = non_empty(&criteria.country) {
        connective(&mut qb, &mut has_where);
        qb.push("country = ");
        qb.push_bind(country.to_string());
    }
    // The public query key is "color"; the column is "colour".
    if let Some(colour) = non_empty(&criteria.color) {
        connective(&mut qb, &mut has_where);
        qb.push("colour = ");
        qb.push_bind(colour.to_string());
    }

    qb
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_omits_absent_criteria() {
        let qb = build_filter_query(&MovieFilter::default());
        assert!(!qb.sql().contains("WHERE"));
    }

    #[test]
    fn test_filter_query_single_criterion() {
        let criteria = MovieFilter {
            year: Some(1958),
            ..Default::default()
        };
        let qb = build_filter_query(&criteria);
        assert!(qb.sql().ends_with("WHERE year = $1"));
    }

    #[test]
    fn test_filter_query_conjunction_and_colour_mapping() {
        let criteria = MovieFilter {
            year: Some(1958),
            genre: Some("Thriller".into()),
            country: None,
            color: Some("Colour".into()),
        };
        let qb = build_filter_query(&criteria);
        let sql = qb.sql().to_string();
        let (_, clause) = sql.split_once(" WHERE ").expect("where clause");
        assert_eq!(clause, "year = $1 AND genre = $2 AND colour = $3");
    }

    #[test]
    fn test_filter_query_skips_empty_and_zero_values() {
        let criteria = MovieFilter {
            year: Some(0),
            genre: Some(String::new()),
            country: Some("Japan".into()),
            color: None,
        };
        let qb = build_filter_query(&criteria);
        assert!(qb.sql().ends_with("WHERE country = $1"));
    }
}
