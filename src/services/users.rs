use serde::Serialize;
use serde_json::Value;

use crate::database::models::{FavoriteEntry, FavoriteItem, User, WatchlistEntry, WatchlistItem};
use crate::database::repositories::{
    FavoriteRepository, MovieRepository, UserRepository, WatchlistRepository,
};
use crate::error::ApiError;
use crate::tmdb::TmdbClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistResponse {
    pub watch_list: Vec<WatchlistItem>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<FavoriteItem>,
}

/// Per-user watchlist and favorite lists. The add paths are deliberate
/// check-then-insert without a transaction; the UNIQUE (user_id, movie_id)
/// constraint is the storage-level guarantee against a concurrent duplicate.
pub struct UserService {
    users: UserRepository,
    movies: MovieRepository,
    watchlist: WatchlistRepository,
    favorites: FavoriteRepository,
    tmdb: TmdbClient,
}

impl UserService {
    pub fn new(
        users: UserRepository,
        movies: MovieRepository,
        watchlist: WatchlistRepository,
        favorites: FavoriteRepository,
        tmdb: TmdbClient,
    ) -> Self {
        Self {
            users,
            movies,
            watchlist,
            favorites,
            tmdb,
        }
    }

    pub async fn add_to_watchlist(
        &self,
        user: &User,
        movie_id: i32,
    ) -> Result<WatchlistEntry, ApiError> {
        if self.movies.find_by_id(movie_id).await?.is_none() {
            return Err(movie_not_found(movie_id));
        }
        if self.watchlist.find_entry(user.id, movie_id).await?.is_some() {
            return Err(ApiError::Conflict(format!(
                "Movie with ID {movie_id} is already in the watchlist"
            )));
        }

        Ok(self.watchlist.insert(user.id, movie_id).await?)
    }

    pub async fn get_watchlist(&self, user: &User) -> Result<WatchlistResponse, ApiError> {
        let watch_list = self.watchlist.list_with_movies(user.id).await?;
        Ok(WatchlistResponse { watch_list })
    }

    /// Favoriting fetches the external metadata synchronously and snapshots
    /// it onto the new row. A metadata failure fails the whole call.
    pub async fn mark_as_favorite(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<FavoriteEntry, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User with ID {user_id} not found")))?;

        let movie = self
            .movies
            .find_by_id(movie_id)
            .await?
            .ok_or_else(|| movie_not_found(movie_id))?;

        if self
            .favorites
            .find_entry(user.id, movie.id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(format!(
                "Movie with ID {movie_id} is already marked as favorite"
            )));
        }

        let details = self.tmdb.fetch_movie_details(movie.id).await?;
        Ok(self.favorites.insert(user.id, movie.id, &details).await?)
    }

    pub async fn get_favorite_list(&self, user: &User) -> Result<FavoritesResponse, ApiError> {
        let favorites = self.favorites.list_with_movies(user.id).await?;
        Ok(FavoritesResponse { favorites })
    }

    /// Reports whether the snapshotted metadata says the favorited movie has
    /// been released.
    pub async fn check_favorite_movie_status(
        &self,
        user: &User,
        favorite_id: i32,
    ) -> Result<String, ApiError> {
        let favorite = self
            .favorites
            .find_by_id_for_user(user.id, favorite_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound(format!(
                    "Favorite movie with ID {favorite_id} not found for user with ID {}",
                    user.id
                ))
            })?;

        let details = favorite.imdb_details.ok_or_else(|| {
            ApiError::NotFound(format!(
                "Movie details for favorite with ID {favorite_id} not found"
            ))
        })?;

        Ok(release_status_message(&details))
    }
}

fn movie_not_found(movie_id: i32) -> ApiError {
    ApiError::NotFound(format!("Movie with ID {movie_id} not found"))
}

/// Keyed on the snapshot status being exactly "Released"; any other status
/// value gets the not-yet-released message.
fn release_status_message(details: &Value) -> String {
    let title = details
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if details.get("status").and_then(Value::as_str) == Some("Released") {
        format!("Congratulations! Your movie \"{title}\" is now available at cinemas.")
    } else {
        format!("The movie \"{title}\" is not yet released. Stay tuned for updates!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_released_status_message() {
        let details = json!({ "title": "Vertigo", "status": "Released" });
        assert_eq!(
            release_status_message(&details),
            "Congratulations! Your movie \"Vertigo\" is now available at cinemas."
        );
    }

    #[test]
    fn test_unreleased_status_message() {
        for status in ["Post Production", "In Production", "Rumored", "released"] {
            let details = json!({ "title": "Dune 3", "status": status });
            assert_eq!(
                release_status_message(&details),
                "The movie \"Dune 3\" is not yet released. Stay tuned for updates!"
            );
        }
    }

    #[test]
    fn test_missing_status_counts_as_unreleased() {
        let details = json!({ "title": "Mystery" });
        assert!(release_status_message(&details).contains("not yet released"));
    }
}
