use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - attached to exactly one post. Comments have no update
/// operation; they are created and deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    /// Set from the requester at creation, immutable afterwards.
    pub author_id: Uuid,
    /// The parent post, resolved before creation, immutable afterwards.
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment by `author_id` on `post_id`.
    pub fn new(author_id: Uuid, post_id: Uuid, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            post_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }
}
