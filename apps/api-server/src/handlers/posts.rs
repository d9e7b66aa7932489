//! Post handlers.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use uuid::Uuid;

use folio_core::domain::{CreatePost, PageRequest, PostChanges, Visibility};
use folio_shared::dto::{CreatePostRequest, ListPostsQuery, OwnPostsQuery, UpdatePostRequest};
use folio_shared::{Paginated, PaginationMeta};

use super::resources::post_resource;
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /posts - published posts, newest first.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let request = PageRequest::new(
        query.page,
        query.per_page,
        state.pagination.default_per_page,
        state.pagination.max_per_page,
    );

    let now = Utc::now();
    let page = state
        .posts
        .list(request)
        .await?
        .map(|p| post_resource(p, now));
    let meta = PaginationMeta {
        current_page: page.page,
        per_page: page.per_page,
        total: page.total,
        last_page: page.last_page(),
    };

    Ok(HttpResponse::Ok().json(Paginated {
        data: page.items,
        meta,
    }))
}

/// GET /posts/{id}
pub async fn show(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state.posts.show(path.into_inner(), viewer.user_id()).await?;

    Ok(HttpResponse::Ok().json(post_resource(post, Utc::now())))
}

/// POST /posts
pub async fn store(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let input = CreatePost {
        title: req.title,
        content: req.content,
        is_draft: req.is_draft,
        published_at: req.published_at,
    };

    let post = state.posts.create(input, Some(identity.user_id)).await?;
    tracing::info!(post_id = %post.post.id, user_id = %identity.user_id, "Post created");

    Ok(HttpResponse::Created().json(post_resource(post, Utc::now())))
}

/// PUT/PATCH /posts/{id} - owner only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        is_draft: req.is_draft,
        published_at: req.published_at,
    };

    let post = state
        .posts
        .update(id, changes, Some(identity.user_id))
        .await
        .inspect_err(|e| {
            tracing::warn!(
                post_id = %id,
                user_id = %identity.user_id,
                error = %e,
                "Post update rejected"
            )
        })?;
    tracing::info!(post_id = %id, user_id = %identity.user_id, "Post updated");

    Ok(HttpResponse::Ok().json(post_resource(post, Utc::now())))
}

/// DELETE /posts/{id} - owner only.
pub async fn destroy(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .posts
        .delete(id, Some(identity.user_id))
        .await
        .inspect_err(|e| {
            tracing::warn!(
                post_id = %id,
                user_id = %identity.user_id,
                error = %e,
                "Post deletion rejected"
            )
        })?;
    tracing::info!(post_id = %id, user_id = %identity.user_id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

/// GET /me/posts - the caller's posts in any state.
pub async fn mine(
    state: web::Data<AppState>,
    identity: Identity,
    query: web::Query<OwnPostsQuery>,
) -> AppResult<HttpResponse> {
    let visibility = query
        .into_inner()
        .state
        .map(|s| s.parse::<Visibility>())
        .transpose()
        .map_err(|e| AppError::Validation(vec![e]))?;

    let posts = state
        .posts
        .list_own(Some(identity.user_id), visibility)
        .await?;

    let now = Utc::now();
    let data: Vec<_> = posts.into_iter().map(|p| post_resource(p, now)).collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "data": data })))
}
