//! Data Transfer Objects - request/response types for the API.
//!
//! Request fields are `Option<String>` so that a missing field and a blank
//! field both surface as structured per-field errors rather than a bare
//! deserialization failure. Unknown payload fields (including any
//! client-supplied `author`) are dropped by serde and never consulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};

use crate::validation::{FieldErrors, not_blank, required};

/// Request to register a new user. The password is write-only: no response
/// type in this crate carries it back out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated registration payload.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

impl RegisterUserRequest {
    pub fn validate(self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::new();
        let username = required(&mut errors, "username", self.username);
        let password = required(&mut errors, "password", self.password);
        let email = not_blank(&mut errors, "email", self.email);

        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => Ok(NewUser {
                username,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request to create a post. Author and timestamps are read-only fields and
/// have no input counterpart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Validated post payload.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(self) -> Result<NewPost, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = required(&mut errors, "title", self.title);
        let content = required(&mut errors, "content", self.content);

        match (title, content) {
            (Some(title), Some(content)) => Ok(NewPost { title, content }),
            _ => Err(errors),
        }
    }
}

/// Partial update of a post: any subset of the mutable fields. An empty
/// payload is valid and changes nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Validated partial-update payload.
#[derive(Debug, Clone)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn validate(self) -> Result<PostPatch, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = not_blank(&mut errors, "title", self.title);
        let content = not_blank(&mut errors, "content", self.content);
        errors.into_result(PostPatch { title, content })
    }
}

/// Request to create a comment. The parent post comes from the path, never
/// the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

/// Validated comment payload.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
}

impl CreateCommentRequest {
    pub fn validate(self) -> Result<NewComment, FieldErrors> {
        let mut errors = FieldErrors::new();
        match required(&mut errors, "content", self.content) {
            Some(content) => Ok(NewComment { content }),
            None => Err(errors),
        }
    }
}

/// Response containing a user's public information. The password hash is
/// deliberately not representable here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// A post as returned to clients; `author` is the owning user's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn project(post: Post, author: impl Into<String>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: author.into(),
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<(Post, User)> for PostResponse {
    fn from((post, author): (Post, User)) -> Self {
        Self::project(post, author.username)
    }
}

/// A comment as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: String,
    pub content: String,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn project(comment: Comment, author: impl Into<String>) -> Self {
        Self {
            id: comment.id,
            author: author.into(),
            content: comment.content,
            post_id: comment.post_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<(Comment, User)> for CommentResponse {
    fn from((comment, author): (Comment, User)) -> Self {
        Self::project(comment, author.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{BLANK, REQUIRED};

    #[test]
    fn test_register_requires_username_and_password() {
        let errors = RegisterUserRequest::default().validate().unwrap_err();
        assert_eq!(errors.0["username"], vec![REQUIRED.to_string()]);
        assert_eq!(errors.0["password"], vec![REQUIRED.to_string()]);
    }

    #[test]
    fn test_register_email_is_optional() {
        let valid = RegisterUserRequest {
            username: Some("jane".to_string()),
            email: None,
            password: Some("Pass123".to_string()),
        }
        .validate()
        .unwrap();

        assert_eq!(valid.username, "jane");
        assert!(valid.email.is_none());
    }

    #[test]
    fn test_create_post_rejects_blank_title() {
        let errors = CreatePostRequest {
            title: Some("   ".to_string()),
            content: Some("body".to_string()),
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.0["title"], vec![BLANK.to_string()]);
        assert!(!errors.0.contains_key("content"));
    }

    #[test]
    fn test_update_post_accepts_empty_payload() {
        let patch = UpdatePostRequest::default().validate().unwrap();
        assert!(patch.title.is_none());
        assert!(patch.content.is_none());
    }

    #[test]
    fn test_update_post_accepts_subset() {
        let patch = UpdatePostRequest {
            title: Some("New title".to_string()),
            content: None,
        }
        .validate()
        .unwrap();

        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert!(patch.content.is_none());
    }

    #[test]
    fn test_client_supplied_author_is_dropped() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title":"T","content":"C","author":"intruder"}"#).unwrap();
        let valid = req.validate().unwrap();
        assert_eq!(valid.title, "T");
    }

    #[test]
    fn test_user_response_never_carries_password() {
        let user = User::new("jane".to_string(), None, "argon2-hash".to_string());
        let body = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!body.contains("password"));
        assert!(!body.contains("argon2-hash"));
    }
}
