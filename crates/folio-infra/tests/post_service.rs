//! Post service behaviour over the in-memory stores.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use folio_core::domain::{CreatePost, PageRequest, PostChanges, User, Visibility};
use folio_core::ports::{BaseRepository, UserRepository};
use folio_core::{DomainError, PostService};
use folio_infra::{InMemoryPostRepository, InMemoryUserRepository};

struct Fixture {
    service: PostService,
    posts: Arc<InMemoryPostRepository>,
    users: Arc<InMemoryUserRepository>,
}

impl Fixture {
    fn new() -> Self {
        let posts = Arc::new(InMemoryPostRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let service = PostService::new(posts.clone(), users.clone());
        Self {
            service,
            posts,
            users,
        }
    }

    async fn user(&self, name: &str) -> Uuid {
        let user = User::new(
            name.to_string(),
            format!("{}@example.com", name.to_lowercase()),
            "hash".to_string(),
        );
        self.users.insert(user).await.unwrap().id
    }

    async fn listed_titles(&self) -> Vec<String> {
        self.service
            .list(PageRequest::new(None, None, 20, 100))
            .await
            .unwrap()
            .items
            .into_iter()
            .map(|p| p.post.title)
            .collect()
    }
}

fn input(
    title: &str,
    is_draft: Option<bool>,
    published_at: Option<chrono::DateTime<Utc>>,
) -> CreatePost {
    CreatePost {
        title: Some(title.to_string()),
        content: Some(format!("{title} body")),
        is_draft,
        published_at,
    }
}

#[tokio::test]
async fn test_draft_becomes_listed_after_publishing() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let intruder = fx.user("Bob").await;

    let created = fx
        .service
        .create(input("A", Some(true), None), Some(author))
        .await
        .unwrap();
    let id = created.post.id;
    assert!(fx.listed_titles().await.is_empty());

    let changes = PostChanges {
        is_draft: Some(false),
        published_at: Some(Some(Utc::now() - Duration::hours(1))),
        ..Default::default()
    };
    fx.service.update(id, changes, Some(author)).await.unwrap();
    assert_eq!(fx.listed_titles().await, vec!["A"]);

    let hijack = PostChanges {
        title: Some("Mine now".to_string()),
        ..Default::default()
    };
    let result = fx.service.update(id, hijack, Some(intruder)).await;
    assert!(matches!(result, Err(DomainError::Forbidden)));
}

#[tokio::test]
async fn test_list_only_contains_active_posts() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let now = Utc::now();

    for (title, is_draft, published_at) in [
        ("live", Some(false), Some(now - Duration::minutes(1))),
        ("draft", Some(true), Some(now - Duration::minutes(1))),
        ("scheduled", Some(false), Some(now + Duration::days(1))),
        ("immediate", None, None),
    ] {
        fx.service
            .create(input(title, is_draft, published_at), Some(author))
            .await
            .unwrap();
    }

    let page = fx
        .service
        .list(PageRequest::new(None, None, 20, 100))
        .await
        .unwrap();

    let mut titles: Vec<&str> = page.items.iter().map(|p| p.post.title.as_str()).collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["immediate", "live"]);
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|p| p.author.as_ref().map(|u| u.id) == Some(author)));
}

#[tokio::test]
async fn test_list_paginates_active_posts() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let now = Utc::now();

    for i in 0..5 {
        let published_at = Some(now - Duration::hours(i));
        fx.service
            .create(input(&format!("Post {i}"), Some(false), published_at), Some(author))
            .await
            .unwrap();
    }

    let page = fx
        .service
        .list(PageRequest::new(Some(2), Some(2), 20, 100))
        .await
        .unwrap();

    let titles: Vec<&str> = page.items.iter().map(|p| p.post.title.as_str()).collect();
    assert_eq!(titles, vec!["Post 2", "Post 3"]);
    assert_eq!(page.total, 5);
    assert_eq!(page.last_page(), 3);
}

#[tokio::test]
async fn test_create_then_find_matches_input() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let published_at = Utc::now() - Duration::minutes(30);

    let created = fx
        .service
        .create(input("Hello", Some(false), Some(published_at)), Some(author))
        .await
        .unwrap();

    let stored = fx.posts.find_by_id(created.post.id).await.unwrap().unwrap();
    assert_eq!(stored.user_id, author);
    assert_eq!(stored.title, "Hello");
    assert_eq!(stored.content, "Hello body");
    assert!(!stored.is_draft);
    assert_eq!(stored.published_at, Some(published_at));
    assert_eq!(created.author.map(|u| u.name), Some("Alice".to_string()));
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let fx = Fixture::new();

    let result = fx.service.create(input("Anon", None, None), None).await;
    assert!(matches!(result, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn test_create_rejects_missing_fields() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;

    let result = fx
        .service
        .create(
            CreatePost {
                title: Some("No content".to_string()),
                ..Default::default()
            },
            Some(author),
        )
        .await;

    match result {
        Err(DomainError::Validation(errors)) => {
            assert_eq!(errors, vec!["content: is required".to_string()])
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(fx.listed_titles().await.is_empty());
}

#[tokio::test]
async fn test_non_owner_update_leaves_record_unchanged() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let intruder = fx.user("Bob").await;

    let created = fx
        .service
        .create(input("Original", Some(false), None), Some(author))
        .await
        .unwrap();
    let before = fx.posts.find_by_id(created.post.id).await.unwrap().unwrap();

    let changes = PostChanges {
        title: Some("Defaced".to_string()),
        is_draft: Some(true),
        ..Default::default()
    };
    let result = fx.service.update(before.id, changes, Some(intruder)).await;
    assert!(matches!(result, Err(DomainError::Forbidden)));

    let after = fx.posts.find_by_id(before.id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_update_guards() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let created = fx
        .service
        .create(input("Guarded", None, None), Some(author))
        .await
        .unwrap();

    let unauthenticated = fx
        .service
        .update(created.post.id, PostChanges::default(), None)
        .await;
    assert!(matches!(unauthenticated, Err(DomainError::Unauthorized)));

    let missing = fx
        .service
        .update(Uuid::new_v4(), PostChanges::default(), Some(author))
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));

    let blank = PostChanges {
        title: Some(" ".to_string()),
        ..Default::default()
    };
    let invalid = fx.service.update(created.post.id, blank, Some(author)).await;
    assert!(matches!(invalid, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn test_publishing_a_draft_stamps_publication_time() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let created = fx
        .service
        .create(input("Draft", Some(true), None), Some(author))
        .await
        .unwrap();
    assert_eq!(created.post.published_at, None);

    let changes = PostChanges {
        is_draft: Some(false),
        ..Default::default()
    };
    let updated = fx
        .service
        .update(created.post.id, changes, Some(author))
        .await
        .unwrap();

    assert!(updated.post.published_at.is_some());
    assert_eq!(fx.listed_titles().await, vec!["Draft"]);
}

#[tokio::test]
async fn test_unscheduling_clears_publication_time() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let created = fx
        .service
        .create(
            input("Later", Some(false), Some(Utc::now() + Duration::days(3))),
            Some(author),
        )
        .await
        .unwrap();

    let changes = PostChanges {
        is_draft: Some(true),
        published_at: Some(None),
        ..Default::default()
    };
    let updated = fx
        .service
        .update(created.post.id, changes, Some(author))
        .await
        .unwrap();

    assert!(updated.post.is_draft);
    assert_eq!(updated.post.published_at, None);
    let stored = fx.posts.find_by_id(created.post.id).await.unwrap().unwrap();
    assert_eq!(stored.published_at, None);
}

#[tokio::test]
async fn test_clearing_time_of_non_draft_publishes_now() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let created = fx
        .service
        .create(
            input("Later", Some(false), Some(Utc::now() + Duration::days(3))),
            Some(author),
        )
        .await
        .unwrap();
    assert!(fx.listed_titles().await.is_empty());

    let changes = PostChanges {
        published_at: Some(None),
        ..Default::default()
    };
    let updated = fx
        .service
        .update(created.post.id, changes, Some(author))
        .await
        .unwrap();

    assert!(updated.post.published_at.is_some());
    assert_eq!(fx.listed_titles().await, vec!["Later"]);
}

#[tokio::test]
async fn test_owner_delete_removes_record() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let intruder = fx.user("Bob").await;
    let created = fx
        .service
        .create(input("Doomed", None, None), Some(author))
        .await
        .unwrap();
    let id = created.post.id;

    let denied = fx.service.delete(id, Some(intruder)).await;
    assert!(matches!(denied, Err(DomainError::Forbidden)));
    assert!(fx.posts.find_by_id(id).await.unwrap().is_some());

    fx.service.delete(id, Some(author)).await.unwrap();
    assert!(fx.posts.find_by_id(id).await.unwrap().is_none());

    let again = fx.service.delete(id, Some(author)).await;
    assert!(matches!(again, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_show_hides_unpublished_posts_from_others() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let reader = fx.user("Bob").await;

    let draft = fx
        .service
        .create(input("Draft", Some(true), None), Some(author))
        .await
        .unwrap();
    let scheduled = fx
        .service
        .create(
            input("Soon", Some(false), Some(Utc::now() + Duration::hours(2))),
            Some(author),
        )
        .await
        .unwrap();
    let live = fx
        .service
        .create(input("Live", None, None), Some(author))
        .await
        .unwrap();

    for id in [draft.post.id, scheduled.post.id] {
        assert!(matches!(
            fx.service.show(id, None).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            fx.service.show(id, Some(reader)).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(fx.service.show(id, Some(author)).await.is_ok());
    }

    let shown = fx.service.show(live.post.id, None).await.unwrap();
    assert_eq!(shown.post.title, "Live");
}

#[tokio::test]
async fn test_list_own_includes_every_state() {
    let fx = Fixture::new();
    let author = fx.user("Alice").await;
    let other = fx.user("Bob").await;

    fx.service
        .create(input("Draft", Some(true), None), Some(author))
        .await
        .unwrap();
    fx.service
        .create(
            input("Soon", Some(false), Some(Utc::now() + Duration::hours(2))),
            Some(author),
        )
        .await
        .unwrap();
    fx.service
        .create(input("Not mine", None, None), Some(other))
        .await
        .unwrap();

    let all = fx.service.list_own(Some(author), None).await.unwrap();
    assert_eq!(all.len(), 2);

    let drafts = fx
        .service
        .list_own(Some(author), Some(Visibility::Draft))
        .await
        .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].post.title, "Draft");

    let anonymous = fx.service.list_own(None, None).await;
    assert!(matches!(anonymous, Err(DomainError::Unauthorized)));
}
