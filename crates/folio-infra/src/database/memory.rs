//! In-memory repositories - used when no database is configured and in tests.
//!
//! Data is lost on process restart.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use folio_core::domain::{NewPost, Post, PostChanges, User, Visibility};
use folio_core::error::RepoError;
use folio_core::ports::{BaseRepository, PostRepository, UserRepository};

/// In-memory post store.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_active(
        &self,
        now: DateTime<Utc>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let store = self.posts.read().await;
        let mut active: Vec<&Post> = store.values().filter(|p| p.is_published_at(now)).collect();
        active.sort_by_key(|p| Reverse((p.published_at, p.created_at)));

        Ok(active
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_active(&self, now: DateTime<Utc>) -> Result<u64, RepoError> {
        let store = self.posts.read().await;
        Ok(store.values().filter(|p| p.is_published_at(now)).count() as u64)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        visibility: Option<Visibility>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        let store = self.posts.read().await;
        let mut posts: Vec<Post> = store
            .values()
            .filter(|p| p.is_owned_by(user_id))
            .filter(|p| visibility.is_none_or(|v| p.visibility_at(now) == v))
            .cloned()
            .collect();
        posts.sort_by_key(|p| Reverse(p.created_at));

        Ok(posts)
    }

    async fn insert(&self, fields: NewPost) -> Result<Post, RepoError> {
        let post = Post::new(fields);
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let mut store = self.posts.write().await;
        let post = store.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.apply(changes);
        Ok(post.clone())
    }
}

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.users.write().await;
        if store.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.users.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let store = self.users.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }
}
