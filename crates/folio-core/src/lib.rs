//! # Folio Core
//!
//! The domain layer of the Folio blog API: posts, their derived
//! visibility, the repository ports and the post service that enforces
//! ownership and visibility rules.
//! This crate has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::PostService;
