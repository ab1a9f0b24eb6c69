use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::cache::{Cache, MemoryCache};
use crate::config::AppConfig;
use crate::database::repositories::{
    FavoriteRepository, MovieRepository, UserRepository, WatchlistRepository,
};
use crate::services::{AuthService, MovieService, SeedService, UserService};
use crate::tmdb::TmdbClient;

/// All services, wired once at startup by plain constructor injection and
/// shared behind an Arc via axum state.
pub struct AppState {
    pub config: AppConfig,
    pub pool: PgPool,
    pub tokens: TokenService,
    pub users: UserRepository,
    pub auth: AuthService,
    pub movies: MovieService,
    pub lists: UserService,
    pub seed: SeedService,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let tokens = TokenService::new(
            config.security.jwt_secret.clone(),
            config.security.access_token_ttl,
            config.security.refresh_token_ttl,
        );
        let users = UserRepository::new(pool.clone());
        let movies = MovieRepository::new(pool.clone());
        let watchlist = WatchlistRepository::new(pool.clone());
        let favorites = FavoriteRepository::new(pool.clone());
        let tmdb = TmdbClient::new(config.tmdb.api_key.clone(), config.tmdb.base_url.clone());
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());

        Self {
            auth: AuthService::new(users.clone(), tokens.clone(), config.security.bcrypt_cost),
            movies: MovieService::new(movies.clone(), cache, config.cache.movie_list_ttl),
            lists: UserService::new(
                users.clone(),
                movies.clone(),
                watchlist,
                favorites,
                tmdb,
            ),
            seed: SeedService::new(movies, config.seed_file_path.clone().into()),
            tokens,
            users,
            pool,
            config,
        }
    }
}
