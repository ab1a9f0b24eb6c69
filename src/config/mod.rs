use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub cache: CacheConfig,
    pub tmdb: TmdbConfig,
    pub seed_file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Expiry for cached paginated movie listings. Entries are never
    /// invalidated on writes; staleness up to this window is accepted.
    pub movie_list_ttl: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        Ok(Self {
            environment,
            port: parsed_or("PORT", 3000)?,
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 10)?,
            },
            security: SecurityConfig {
                jwt_secret: required("JWT_SECRET")?,
                access_token_ttl: ttl_or("JWT_ACCESS_TOKEN_EXPIRY", Duration::from_secs(15 * 60))?,
                refresh_token_ttl: ttl_or("JWT_REFRESH_TOKEN_EXPIRY", Duration::from_secs(7 * 86400))?,
                bcrypt_cost: parsed_or("SALT_ROUNDS", 10)?,
            },
            cache: CacheConfig {
                movie_list_ttl: ttl_or("MOVIE_CACHE_TTL", Duration::from_secs(3600))?,
            },
            tmdb: TmdbConfig {
                api_key: required("MOVIE_DB_API_KEY")?,
                base_url: env::var("MOVIE_DB_BASE_URL")
                    .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string()),
            },
            seed_file_path: env::var("SEED_FILE_PATH").unwrap_or_else(|_| "seeds/movies.csv".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
            name,
            message: format!("{e}"),
        }),
        Err(_) => Ok(default),
    }
}

fn ttl_or(name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => parse_ttl(&raw).map_err(|message| ConfigError::Invalid { name, message }),
        Err(_) => Ok(default),
    }
}

/// Parses a token lifetime string: `90s`, `15m`, `1h`, `7d`, or bare seconds.
pub fn parse_ttl(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty duration".to_string());
    }

    let (digits, unit) = match raw.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((idx, _)) => raw.split_at(idx),
        None => (raw, ""),
    };

    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration: {raw}"))?;

    let seconds = match unit {
        "" | "s" => amount,
        "m" => amount * 60,
        "h" => amount * 3600,
        "d" => amount * 86400,
        other => return Err(format!("unknown duration unit: {other}")),
    };

    Ok(Duration::from_secs(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_units() {
        assert_eq!(parse_ttl("90"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_ttl("90s"), Ok(Duration::from_secs(90)));
        assert_eq!(parse_ttl("15m"), Ok(Duration::from_secs(900)));
        assert_eq!(parse_ttl("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_ttl("7d"), Ok(Duration::from_secs(604800)));
    }

    #[test]
    fn test_parse_ttl_rejects_garbage() {
        assert!(parse_ttl("").is_err());
        assert!(parse_ttl("abc").is_err());
        assert!(parse_ttl("10w").is_err());
        assert!(parse_ttl("m10").is_err());
    }
}
