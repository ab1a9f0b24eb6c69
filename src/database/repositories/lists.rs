use serde_json::Value;
use sqlx::PgPool;

use crate::database::models::{FavoriteEntry, FavoriteItem, WatchlistEntry, WatchlistItem};

#[derive(Debug, Clone)]
pub struct WatchlistRepository {
    pool: PgPool,
}

impl WatchlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_entry(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<WatchlistEntry>, sqlx::Error> {
        sqlx::query_as::<_, WatchlistEntry>(
            "SELECT id, user_id, movie_id FROM watchlist WHERE user_id = $1 AND movie_id = $2",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert(&self, user_id: i32, movie_id: i32) -> Result<WatchlistEntry, sqlx::Error> {
        sqlx::query_as::<_, WatchlistEntry>(
            "INSERT INTO watchlist (user_id, movie_id) VALUES ($1, $2) \
             RETURNING id, user_id, movie_id",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(&self.pool)
        .await
    }

    /// All watchlist rows for a user with the movie attached. No ordering
    /// contract.
    pub async fn list_with_movies(&self, user_id: i32) -> Result<Vec<WatchlistItem>, sqlx::Error> {
        sqlx::query_as::<_, WatchlistItem>(
            "SELECT w.id, w.user_id, w.movie_id, to_jsonb(m) AS movie \
             FROM watchlist w JOIN movies m ON m.id = w.movie_id \
             WHERE w.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_entry(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<Option<FavoriteEntry>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteEntry>(
            "SELECT id, user_id, movie_id, imdb_details FROM favorites \
             WHERE user_id = $1 AND movie_id = $2",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Looks up a favorite by its own id, scoped to the owning user.
    pub async fn find_by_id_for_user(
        &self,
        user_id: i32,
        favorite_id: i32,
    ) -> Result<Option<FavoriteEntry>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteEntry>(
            "SELECT id, user_id, movie_id, imdb_details FROM favorites \
             WHERE id = $1 AND user_id = $2",
        )
        .bind(favorite_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert(
        &self,
        user_id: i32,
        movie_id: i32,
        imdb_details: &Value,
    ) -> Result<FavoriteEntry, sqlx::Error> {
        sqlx::query_as::<_, FavoriteEntry>(
            "INSERT INTO favorites (user_id, movie_id, imdb_details) VALUES ($1, $2, $3) \
             RETURNING id, user_id, movie_id, imdb_details",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(imdb_details)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list_with_movies(&self, user_id: i32) -> Result<Vec<FavoriteItem>, sqlx::Error> {
        sqlx::query_as::<_, FavoriteItem>(
            "SELECT f.id, f.user_id, f.movie_id, f.imdb_details, to_jsonb(m) AS movie \
             FROM favorites f JOIN movies m ON m.id = f.movie_id \
             WHERE f.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }
}
