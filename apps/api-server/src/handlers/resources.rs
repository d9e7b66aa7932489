//! Domain to wire conversions.

use chrono::{DateTime, Utc};

use folio_core::domain::{PostWithAuthor, User};
use folio_shared::dto::{PostResponse, UserResponse};

pub fn user_resource(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

/// Render a post; `status` is the visibility at `now`.
pub fn post_resource(item: PostWithAuthor, now: DateTime<Utc>) -> PostResponse {
    let PostWithAuthor { post, author } = item;
    PostResponse {
        status: post.visibility_at(now).as_str().to_string(),
        user: author.as_ref().map(user_resource),
        id: post.id,
        user_id: post.user_id,
        title: post.title,
        content: post.content,
        is_draft: post.is_draft,
        published_at: post.published_at,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
