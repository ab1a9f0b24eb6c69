use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::Cache;
use crate::database::models::{CreateMovie, Movie, MovieFilter, UpdateMovie};
use crate::database::repositories::MovieRepository;
use crate::error::ApiError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// One page of the catalog listing, as served and as cached.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoviePage {
    pub data: Vec<Movie>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

pub struct MovieService {
    movies: MovieRepository,
    cache: Arc<dyn Cache>,
    list_ttl: Duration,
}

impl MovieService {
    pub fn new(movies: MovieRepository, cache: Arc<dyn Cache>, list_ttl: Duration) -> Self {
        Self {
            movies,
            cache,
            list_ttl,
        }
    }

    /// Paginated listing with a read-through cache. Entries expire after the
    /// configured TTL and are never invalidated on writes; a stale page
    /// within that window is documented behavior.
    pub async fn list(&self, page: Option<i64>, limit: Option<i64>) -> Result<MoviePage, ApiError> {
        let (page, limit, offset) = page_params(page, limit);
        let key = cache_key(page, limit);

        if let Some(cached) = self.cache.get(&key).await {
            match serde_json::from_str::<MoviePage>(&cached) {
                Ok(page) => return Ok(page),
                Err(e) => tracing::warn!("discarding undecodable cache entry {key}: {e}"),
            }
        }

        let data = self.movies.find_page(limit, offset).await?;
        let total = self.movies.count().await?;
        let response = MoviePage {
            data,
            page,
            limit,
            total,
        };

        match serde_json::to_string(&response) {
            Ok(body) => self.cache.set(&key, body, self.list_ttl).await,
            Err(e) => tracing::warn!("failed to serialize movie page for cache: {e}"),
        }

        Ok(response)
    }

    pub async fn get(&self, id: i32) -> Result<Movie, ApiError> {
        self.movies
            .find_by_id(id)
            .await?
            .ok_or_else(|| movie_not_found(id))
    }

    pub async fn create(&self, movie: &CreateMovie) -> Result<Movie, ApiError> {
        Ok(self.movies.insert(movie).await?)
    }

    pub async fn update(&self, id: i32, changes: &UpdateMovie) -> Result<Movie, ApiError> {
        self.movies
            .update(id, changes)
            .await?
            .ok_or_else(|| movie_not_found(id))
    }

    pub async fn delete(&self, id: i32) -> Result<(), ApiError> {
        if !self.movies.delete(id).await? {
            return Err(movie_not_found(id));
        }
        Ok(())
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Movie>, ApiError> {
        Ok(self.movies.search(term).await?)
    }

    pub async fn filter(&self, criteria: &MovieFilter) -> Result<Vec<Movie>, ApiError> {
        Ok(self.movies.filter(criteria).await?)
    }
}

fn movie_not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Movie with ID {id} not found"))
}

fn cache_key(page: i64, limit: i64) -> String {
    format!("movies:{page}:{limit}")
}

/// Resolves pagination defaults and the 1-indexed offset.
fn page_params(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);
    (page, limit, (page - 1) * limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use sqlx::postgres::PgPoolOptions;

    // Lazy pool against a refused port: any storage query errors, so these
    // tests can tell whether `list` actually reached the repository.
    fn unreachable_service(cache: Arc<dyn Cache>) -> MovieService {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(100))
            .connect_lazy("postgres://localhost:1/unreachable")
            .unwrap();
        MovieService::new(MovieRepository::new(pool), cache, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_list_serves_cached_page_without_storage() {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        let stored = MoviePage {
            data: Vec::new(),
            page: 1,
            limit: 10,
            total: 42,
        };
        cache
            .set(
                "movies:1:10",
                serde_json::to_string(&stored).unwrap(),
                Duration::from_secs(60),
            )
            .await;

        let service = unreachable_service(cache);
        let page = service.list(Some(1), Some(10)).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total, 42);
    }

    #[tokio::test]
    async fn test_list_discards_undecodable_cache_entry() {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new());
        cache
            .set("movies:1:10", "not a page".to_string(), Duration::from_secs(60))
            .await;

        // The poisoned entry is dropped and the lookup proceeds to storage,
        // which is unreachable here.
        let service = unreachable_service(cache);
        assert!(service.list(Some(1), Some(10)).await.is_err());
    }

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key(1, 10), "movies:1:10");
        assert_eq!(cache_key(3, 25), "movies:3:25");
    }

    #[test]
    fn test_page_params_defaults() {
        assert_eq!(page_params(None, None), (1, 10, 0));
    }

    #[test]
    fn test_page_params_offset() {
        assert_eq!(page_params(Some(3), Some(10)), (3, 10, 20));
        assert_eq!(page_params(Some(2), Some(25)), (2, 25, 25));
    }

    #[test]
    fn test_page_params_clamps_nonsense() {
        assert_eq!(page_params(Some(0), Some(-5)), (1, 1, 0));
    }
}
