//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, Unchanged,
};
use uuid::Uuid;

use folio_core::domain::{NewPost, Post, PostChanges, User, Visibility};
use folio_core::error::RepoError;
use folio_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Mask an email address for logging.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(user_id = %model.id, "User inserted");
        Ok(model.into())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// `WHERE` clause selecting posts in the given visibility at `now`.
///
/// Matches `Post::visibility_at`: a non-draft post without a publication
/// time is a draft.
fn visibility_condition(visibility: Visibility, now: DateTime<Utc>) -> Condition {
    let now: DateTimeWithTimeZone = now.into();
    match visibility {
        Visibility::Draft => Condition::any()
            .add(post::Column::IsDraft.eq(true))
            .add(post::Column::PublishedAt.is_null()),
        Visibility::Scheduled => Condition::all()
            .add(post::Column::IsDraft.eq(false))
            .add(post::Column::PublishedAt.gt(now)),
        Visibility::Published => Condition::all()
            .add(post::Column::IsDraft.eq(false))
            .add(post::Column::PublishedAt.lte(now)),
    }
}

fn active_posts(now: DateTime<Utc>) -> Select<PostEntity> {
    PostEntity::find().filter(visibility_condition(Visibility::Published, now))
}

fn active_page(now: DateTime<Utc>, limit: u64, offset: u64) -> Select<PostEntity> {
    active_posts(now)
        .order_by_desc(post::Column::PublishedAt)
        .order_by_desc(post::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
}

fn posts_of(
    user_id: Uuid,
    visibility: Option<Visibility>,
    now: DateTime<Utc>,
) -> Select<PostEntity> {
    let mut query = PostEntity::find().filter(post::Column::UserId.eq(user_id));
    if let Some(visibility) = visibility {
        query = query.filter(visibility_condition(visibility, now));
    }
    query.order_by_desc(post::Column::CreatedAt)
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_active(
        &self,
        now: DateTime<Utc>,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let result = active_page(now, limit, offset)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(count = result.len(), limit, offset, "Loaded active posts");
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_active(&self, now: DateTime<Utc>) -> Result<u64, RepoError> {
        active_posts(now).count(&self.db).await.map_err(map_db_err)
    }

    async fn find_by_user(
        &self,
        user_id: Uuid,
        visibility: Option<Visibility>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, RepoError> {
        let result = posts_of(user_id, visibility, now)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, fields: NewPost) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(Post::new(fields))
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %model.id, user_id = %model.user_id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: Uuid, changes: PostChanges) -> Result<Post, RepoError> {
        let active = post::ActiveModel {
            id: Unchanged(id),
            user_id: NotSet,
            title: changes.title.map_or(NotSet, Set),
            content: changes.content.map_or(NotSet, Set),
            is_draft: changes.is_draft.map_or(NotSet, Set),
            published_at: changes
                .published_at
                .map_or(NotSet, |at| Set(at.map(Into::into))),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };

        let model = active.update(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = %model.id, "Post updated");
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait, Value};

    fn sql_and_values(query: Select<PostEntity>) -> (String, Vec<Value>) {
        let stmt = query.build(DbBackend::Postgres);
        (stmt.sql, stmt.values.map(|v| v.0).unwrap_or_default())
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("writer@example.com"), "w***@example.com");
        assert_eq!(mask_email("w@example.com"), "***@example.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }

    #[test]
    fn test_active_page_filters_orders_and_paginates() {
        let now = Utc::now();
        let (sql, values) = sql_and_values(active_page(now, 20, 40));

        assert!(sql.contains(r#""posts"."is_draft" = $"#), "{sql}");
        assert!(sql.contains(r#""posts"."published_at" <= $"#), "{sql}");
        assert!(!sql.contains("IS NULL"), "{sql}");
        assert!(
            sql.contains(r#"ORDER BY "posts"."published_at" DESC, "posts"."created_at" DESC"#),
            "{sql}"
        );
        assert!(sql.contains("LIMIT $") && sql.contains("OFFSET $"), "{sql}");

        let now_tz: DateTimeWithTimeZone = now.into();
        assert!(values.contains(&Value::from(false)));
        assert!(values.contains(&Value::from(now_tz)));
        assert!(values.contains(&Value::from(20u64)));
        assert!(values.contains(&Value::from(40u64)));
    }

    #[test]
    fn test_count_uses_the_active_filter() {
        let (sql, values) = sql_and_values(active_posts(Utc::now()));

        assert!(sql.contains(r#""posts"."is_draft" = $"#), "{sql}");
        assert!(sql.contains(r#""posts"."published_at" <= $"#), "{sql}");
        assert!(values.contains(&Value::from(false)));
    }

    #[test]
    fn test_own_posts_without_state_only_filter_owner() {
        let user_id = Uuid::new_v4();
        let (sql, values) = sql_and_values(posts_of(user_id, None, Utc::now()));

        assert!(sql.contains(r#""posts"."user_id" = $1"#), "{sql}");
        assert!(!sql.contains(r#""posts"."is_draft" = "#), "{sql}");
        assert!(sql.contains(r#"ORDER BY "posts"."created_at" DESC"#), "{sql}");
        assert_eq!(values, vec![Value::from(user_id)]);
    }

    #[test]
    fn test_own_drafts_include_unpublished_posts() {
        let (sql, values) =
            sql_and_values(posts_of(Uuid::new_v4(), Some(Visibility::Draft), Utc::now()));

        assert!(sql.contains(r#""posts"."is_draft" = $"#), "{sql}");
        assert!(sql.contains(r#""posts"."published_at" IS NULL"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(values.contains(&Value::from(true)));
    }

    #[test]
    fn test_own_scheduled_posts_are_in_the_future() {
        let (sql, values) = sql_and_values(posts_of(
            Uuid::new_v4(),
            Some(Visibility::Scheduled),
            Utc::now(),
        ));

        assert!(sql.contains(r#""posts"."published_at" > $"#), "{sql}");
        assert!(!sql.contains(" OR "), "{sql}");
        assert!(values.contains(&Value::from(false)));
    }

    #[test]
    fn test_own_published_posts_are_in_the_past() {
        let (sql, _) = sql_and_values(posts_of(
            Uuid::new_v4(),
            Some(Visibility::Published),
            Utc::now(),
        ));

        assert!(sql.contains(r#""posts"."published_at" <= $"#), "{sql}");
        assert!(!sql.contains("IS NULL"), "{sql}");
    }
}
