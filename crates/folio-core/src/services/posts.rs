//! Post use cases: visibility filtering and ownership checks around the store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    CreatePost, NewPost, Page, PageRequest, Post, PostChanges, PostWithAuthor, User, Visibility,
};
use crate::error::DomainError;
use crate::ports::{BaseRepository, PostRepository, UserRepository};

/// Post service.
///
/// The caller's identity is passed explicitly to every operation; `None`
/// means an anonymous request.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Published posts, newest first, with their authors.
    pub async fn list(&self, page: PageRequest) -> Result<Page<PostWithAuthor>, DomainError> {
        let now = Utc::now();
        let posts = self
            .posts
            .find_active(now, page.limit(), page.offset())
            .await?;
        let total = self.posts.count_active(now).await?;

        Ok(Page {
            items: self.attach_authors(posts).await?,
            page: page.page,
            per_page: page.per_page,
            total,
        })
    }

    /// A single post.
    ///
    /// Drafts and scheduled posts are only shown to their owner. Everyone
    /// else gets `NotFound`, so hidden posts are indistinguishable from
    /// missing ones.
    pub async fn show(
        &self,
        id: Uuid,
        viewer: Option<Uuid>,
    ) -> Result<PostWithAuthor, DomainError> {
        let post = self.find(id).await?;

        let is_owner = viewer.is_some_and(|user_id| post.is_owned_by(user_id));
        if !is_owner && !post.is_published_at(Utc::now()) {
            return Err(DomainError::post_not_found(id));
        }

        self.with_author(post).await
    }

    pub async fn create(
        &self,
        input: CreatePost,
        current_user: Option<Uuid>,
    ) -> Result<PostWithAuthor, DomainError> {
        let user_id = current_user.ok_or(DomainError::Unauthorized)?;
        input.validate().map_err(DomainError::Validation)?;

        let is_draft = input.is_draft.unwrap_or(false);
        let published_at = match input.published_at {
            None if !is_draft => Some(Utc::now()),
            other => other,
        };

        let post = self
            .posts
            .insert(NewPost {
                user_id,
                title: input.title.unwrap_or_default(),
                content: input.content.unwrap_or_default(),
                is_draft,
                published_at,
            })
            .await?;

        self.with_author(post).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        mut changes: PostChanges,
        current_user: Option<Uuid>,
    ) -> Result<PostWithAuthor, DomainError> {
        let user_id = current_user.ok_or(DomainError::Unauthorized)?;
        let post = self.find(id).await?;
        if !post.is_owned_by(user_id) {
            return Err(DomainError::Forbidden);
        }
        changes.validate().map_err(DomainError::Validation)?;

        let is_draft = changes.is_draft.unwrap_or(post.is_draft);
        let published_at = changes.published_at.unwrap_or(post.published_at);
        if !is_draft && published_at.is_none() {
            changes.published_at = Some(Some(Utc::now()));
        }
        if changes.is_empty() {
            return self.with_author(post).await;
        }

        let updated = self.posts.update(id, changes).await?;
        self.with_author(updated).await
    }

    pub async fn delete(&self, id: Uuid, current_user: Option<Uuid>) -> Result<(), DomainError> {
        let user_id = current_user.ok_or(DomainError::Unauthorized)?;
        let post = self.find(id).await?;
        if !post.is_owned_by(user_id) {
            return Err(DomainError::Forbidden);
        }

        self.posts.delete(id).await?;
        Ok(())
    }

    /// Every post of the current user, in any state unless filtered.
    pub async fn list_own(
        &self,
        current_user: Option<Uuid>,
        visibility: Option<Visibility>,
    ) -> Result<Vec<PostWithAuthor>, DomainError> {
        let user_id = current_user.ok_or(DomainError::Unauthorized)?;
        let posts = self
            .posts
            .find_by_user(user_id, visibility, Utc::now())
            .await?;

        self.attach_authors(posts).await
    }

    async fn find(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    async fn with_author(&self, post: Post) -> Result<PostWithAuthor, DomainError> {
        let author = self.users.find_by_id(post.user_id).await?;
        Ok(PostWithAuthor { post, author })
    }

    /// Load the owners of a batch of posts with a single lookup.
    async fn attach_authors(&self, posts: Vec<Post>) -> Result<Vec<PostWithAuthor>, DomainError> {
        let mut ids: Vec<Uuid> = posts.iter().map(|p| p.user_id).collect();
        ids.sort_unstable();
        ids.dedup();

        let authors: HashMap<Uuid, User> = self
            .users
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| PostWithAuthor {
                author: authors.get(&post.user_id).cloned(),
                post,
            })
            .collect())
    }
}
