use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::database::models::{CreateMovie, Movie, MovieFilter, UpdateMovie};
use crate::error::ApiError;
use crate::services::movies::MoviePage;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: Vec<Movie>,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub movies: Vec<Movie>,
}

/// GET /movies?page=&limit=
pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<MoviePage>, ApiError> {
    let page = state.movies.list(query.page, query.limit).await?;
    Ok(Json(page))
}

/// POST /movies
pub async fn create(
    State(state): State<SharedState>,
    Json(body): Json<CreateMovie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let movie = state.movies.create(&body).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// GET /movies/:id
pub async fn find_one(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(state.movies.get(id).await?))
}

/// PUT /movies/:id
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateMovie>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(state.movies.update(id, &body).await?))
}

/// DELETE /movies/:id
pub async fn remove(
    State(state): State<SharedState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.movies.delete(id).await?;
    Ok(StatusCode::OK)
}

/// GET /movies/search?term=
pub async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let term = query
        .term
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("Search term is required".to_string()))?;

    let data = state.movies.search(term).await?;
    Ok(Json(SearchResponse { data }))
}

/// GET /movies/filter?year=&genre=&country=&color=
pub async fn filter(
    State(state): State<SharedState>,
    Query(criteria): Query<MovieFilter>,
) -> Result<Json<FilterResponse>, ApiError> {
    let movies = state.movies.filter(&criteria).await?;
    Ok(Json(FilterResponse { movies }))
}
