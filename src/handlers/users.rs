use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::database::models::{FavoriteEntry, WatchlistEntry};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::services::users::{FavoritesResponse, WatchlistResponse};
use crate::state::SharedState;

/// POST /users/watchlist/:id
pub async fn add_to_watchlist(
    State(state): State<SharedState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(movie_id): Path<i32>,
) -> Result<(StatusCode, Json<WatchlistEntry>), ApiError> {
    let entry = state.lists.add_to_watchlist(&user, movie_id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /users/watchlist
pub async fn get_watchlist(
    State(state): State<SharedState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<WatchlistResponse>, ApiError> {
    Ok(Json(state.lists.get_watchlist(&user).await?))
}

/// POST /users/favorites/:id
pub async fn mark_as_favorite(
    State(state): State<SharedState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(movie_id): Path<i32>,
) -> Result<(StatusCode, Json<FavoriteEntry>), ApiError> {
    let entry = state.lists.mark_as_favorite(user.id, movie_id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /users/favorites
pub async fn get_favorites(
    State(state): State<SharedState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    Ok(Json(state.lists.get_favorite_list(&user).await?))
}

/// GET /users/favorites/:id/status
///
/// The body is the bare message text, not a JSON-quoted string.
pub async fn favorite_status(
    State(state): State<SharedState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(favorite_id): Path<i32>,
) -> Result<String, ApiError> {
    state
        .lists
        .check_favorite_movie_status(&user, favorite_id)
        .await
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::header;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_status_message_served_as_plain_text() {
        let message =
            "The movie \"Dune 3\" is not yet released. Stay tuned for updates!".to_string();
        let response = message.clone().into_response();

        let content_type = response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_owned();
        assert!(content_type.starts_with("text/plain"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], message.as_bytes());
    }
}
