use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// Maximum length of a post title, in characters.
pub const TITLE_MAX_LEN: usize = 255;

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Publication state of a post, derived from `is_draft` and `published_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Draft,
    Scheduled,
    #[serde(alias = "active")]
    Published,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Draft => "draft",
            Visibility::Scheduled => "scheduled",
            Visibility::Published => "published",
        }
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Visibility::Draft),
            "scheduled" => Ok(Visibility::Scheduled),
            "published" | "active" => Ok(Visibility::Published),
            other => Err(format!(
                "state: must be one of draft, scheduled, published (got '{other}')"
            )),
        }
    }
}

impl Post {
    /// Build a post from creation fields with a fresh id and timestamps.
    pub fn new(fields: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: fields.user_id,
            title: fields.title,
            content: fields.content,
            is_draft: fields.is_draft,
            published_at: fields.published_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Visibility at the given instant.
    ///
    /// A non-draft post without a publication time has never been published
    /// and counts as a draft.
    pub fn visibility_at(&self, now: DateTime<Utc>) -> Visibility {
        if self.is_draft {
            return Visibility::Draft;
        }
        match self.published_at {
            Some(at) if at > now => Visibility::Scheduled,
            Some(_) => Visibility::Published,
            None => Visibility::Draft,
        }
    }

    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.visibility_at(now) == Visibility::Published
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Apply a partial update in place, refreshing `updated_at`.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(is_draft) = changes.is_draft {
            self.is_draft = is_draft;
        }
        if let Some(published_at) = changes.published_at {
            self.published_at = published_at;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields accepted by the store when inserting a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
}

/// Unvalidated creation input. Required fields are optional here so that
/// their absence surfaces as a validation error.
#[derive(Debug, Clone, Default)]
pub struct CreatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

impl CreatePost {
    /// Check required fields and limits, returning one message per problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        match self.title.as_deref() {
            None => errors.push("title: is required".to_string()),
            Some(title) => check_title(title, &mut errors),
        }
        match self.content.as_deref() {
            None => errors.push("content: is required".to_string()),
            Some(content) => check_content(content, &mut errors),
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    /// `Some(None)` clears the publication time.
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.is_draft.is_none()
            && self.published_at.is_none()
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if let Some(title) = self.title.as_deref() {
            check_title(title, &mut errors);
        }
        if let Some(content) = self.content.as_deref() {
            check_content(content, &mut errors);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn check_title(title: &str, errors: &mut Vec<String>) {
    if title.trim().is_empty() {
        errors.push("title: must not be blank".to_string());
    } else if title.chars().count() > TITLE_MAX_LEN {
        errors.push(format!("title: must be at most {TITLE_MAX_LEN} characters"));
    }
}

fn check_content(content: &str, errors: &mut Vec<String>) {
    if content.trim().is_empty() {
        errors.push("content: must not be blank".to_string());
    }
}

/// A post together with its owner, as returned to API consumers.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post(is_draft: bool, published_at: Option<DateTime<Utc>>) -> Post {
        Post::new(NewPost {
            user_id: Uuid::new_v4(),
            title: "Title".to_string(),
            content: "Body".to_string(),
            is_draft,
            published_at,
        })
    }

    #[test]
    fn test_visibility_states() {
        let now = Utc::now();

        assert_eq!(post(true, None).visibility_at(now), Visibility::Draft);
        assert_eq!(
            post(true, Some(now - Duration::hours(1))).visibility_at(now),
            Visibility::Draft
        );
        assert_eq!(
            post(false, Some(now + Duration::hours(1))).visibility_at(now),
            Visibility::Scheduled
        );
        assert_eq!(
            post(false, Some(now - Duration::hours(1))).visibility_at(now),
            Visibility::Published
        );
        assert_eq!(post(false, Some(now)).visibility_at(now), Visibility::Published);
    }

    #[test]
    fn test_unpublished_non_draft_counts_as_draft() {
        let now = Utc::now();
        assert_eq!(post(false, None).visibility_at(now), Visibility::Draft);
    }

    #[test]
    fn test_scheduled_post_becomes_published_over_time() {
        let now = Utc::now();
        let scheduled = post(false, Some(now + Duration::minutes(5)));

        assert!(!scheduled.is_published_at(now));
        assert!(scheduled.is_published_at(now + Duration::minutes(5)));
    }

    #[test]
    fn test_create_validation_reports_missing_fields() {
        let errors = CreatePost::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec!["title: is required".to_string(), "content: is required".to_string()]
        );
    }

    #[test]
    fn test_create_validation_rejects_long_title() {
        let input = CreatePost {
            title: Some("x".repeat(TITLE_MAX_LEN + 1)),
            content: Some("Body".to_string()),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_changes_validation_only_checks_present_fields() {
        let changes = PostChanges {
            is_draft: Some(false),
            ..Default::default()
        };
        assert!(changes.validate().is_ok());

        let changes = PostChanges {
            content: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            changes.validate().unwrap_err(),
            vec!["content: must not be blank".to_string()]
        );
    }

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let mut p = post(true, None);
        let before = p.clone();

        p.apply(PostChanges {
            title: Some("New".to_string()),
            ..Default::default()
        });

        assert_eq!(p.title, "New");
        assert_eq!(p.content, before.content);
        assert!(p.is_draft);
        assert!(p.updated_at >= before.updated_at);
    }

    #[test]
    fn test_apply_can_clear_publication_time() {
        let mut p = post(false, Some(Utc::now() + Duration::days(3)));

        p.apply(PostChanges {
            is_draft: Some(true),
            published_at: Some(None),
            ..Default::default()
        });

        assert!(p.is_draft);
        assert_eq!(p.published_at, None);
    }

    #[test]
    fn test_visibility_from_str() {
        assert_eq!("draft".parse::<Visibility>(), Ok(Visibility::Draft));
        assert_eq!("active".parse::<Visibility>(), Ok(Visibility::Published));
        assert!("archived".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_visibility_accepts_active_alias() {
        let v: Visibility = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(v, Visibility::Published);
    }
}
