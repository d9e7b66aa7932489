//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Body of `POST /posts`. Required fields are optional here so that their
/// absence is reported as a validation failure rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Body of `PUT`/`PATCH /posts/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    /// Absent: unchanged. `null`: cleared.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

/// Deserialize a field that was present in the body, possibly as `null`.
/// Combined with `#[serde(default)]`, an absent field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A post as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Derived state: `draft`, `scheduled` or `published`.
    pub status: String,
    pub user: Option<UserResponse>,
}

/// Query string of `GET /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Query string of `GET /me/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnPostsQuery {
    /// `draft`, `scheduled` or `published`; all states when absent.
    pub state: Option<String>,
}
