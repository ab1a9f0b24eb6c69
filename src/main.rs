use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use cinescope::config::AppConfig;
use cinescope::database::manager;
use cinescope::error;
use cinescope::handlers::{auth, movies, system, users};
use cinescope::middleware::require_auth;
use cinescope::state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env()?;
    error::expose_internal_detail(!config.is_production());

    let pool = manager::connect(&config.database).await?;
    let port = config.port;
    let state: SharedState = Arc::new(AppState::new(config, pool));

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: SharedState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(movie_routes())
        .merge(user_routes(state.clone()))
        .merge(system_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn auth_routes() -> Router<SharedState> {
    Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
}

fn movie_routes() -> Router<SharedState> {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route("/movies/search", get(movies::search))
        .route("/movies/filter", get(movies::filter))
        .route(
            "/movies/:id",
            get(movies::find_one)
                .put(movies::update)
                .delete(movies::remove),
        )
}

/// Everything under /users requires a valid bearer token; the middleware
/// loads the user row and stores it as a request extension.
fn user_routes(state: SharedState) -> Router<SharedState> {
    Router::new()
        .route("/users/watchlist/:id", post(users::add_to_watchlist))
        .route("/users/watchlist", get(users::get_watchlist))
        .route("/users/favorites/:id", post(users::mark_as_favorite))
        .route("/users/favorites", get(users::get_favorites))
        .route("/users/favorites/:id/status", get(users::favorite_status))
        .route_layer(from_fn_with_state(state, require_auth))
}

fn system_routes() -> Router<SharedState> {
    Router::new()
        .route("/healthz", get(system::healthz))
        .route("/database/seed", post(system::seed))
}
