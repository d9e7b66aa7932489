//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use folio_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on in-memory storage.
    pub database: Option<DatabaseConfig>,
    pub pagination: PaginationConfig,
}

/// Page size limits for post listings.
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    pub default_per_page: u64,
    pub max_per_page: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: 20,
            max_per_page: 100,
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut db = DatabaseConfig::new(url);
            db.max_connections = parse_var("DB_MAX_CONNECTIONS", db.max_connections);
            db.min_connections = parse_var("DB_MIN_CONNECTIONS", db.min_connections);
            db
        });

        let defaults = PaginationConfig::default();
        let pagination = PaginationConfig {
            default_per_page: parse_var("POSTS_PER_PAGE", defaults.default_per_page),
            max_per_page: parse_var("POSTS_MAX_PER_PAGE", defaults.max_per_page),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            pagination,
        }
    }
}
