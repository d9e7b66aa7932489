use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges, User, Visibility};
use crate::error::RepoError;

/// Operations every repository supports.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Persist a new user.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Load several users at once. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

/// Post store.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Published posts at `now`, newest publication first.
    async fn find_active(
        &self,
        now: DateTime<Utc>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Number of published posts at `now`.
    async fn count_active(&self, now: DateTime<Utc>) -> Result<u64, RepoError>;

    /// All posts of one owner, newest first, optionally restricted to one visibility.
    async fn find_by_user(
        &self,
        user_id: Uuid,
        visibility: Option<Visibility>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError>;

    /// Insert a post, generating its id and timestamps.
    async fn insert(&self, fields: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update and return the stored result.
    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError>;
}
