//! # Folio Infrastructure
//!
//! Concrete implementations of the ports defined in `folio-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory storage only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `auth` - JWT + Argon2 authentication

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
