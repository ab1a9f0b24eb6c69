use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

use super::Movie;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
}

/// Watchlist row joined with its movie.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub movie: Json<Movie>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    /// Metadata snapshot captured when the favorite was created; never
    /// refreshed afterwards.
    pub imdb_details: Option<Value>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    pub id: i32,
    pub user_id: i32,
    pub movie_id: i32,
    pub imdb_details: Option<Value>,
    pub movie: Json<Movie>,
}
