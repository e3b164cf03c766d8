use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog post owned by its author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Set from the requester at creation, immutable afterwards.
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post authored by `author_id`.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial edit. Unspecified fields are left unchanged;
    /// `updated_at` is refreshed either way.
    pub fn apply_patch(&mut self, title: Option<String>, content: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_patch_keeps_unspecified_fields() {
        let author = Uuid::new_v4();
        let mut post = Post::new(author, "Title".to_string(), "Content".to_string());
        post.apply_patch(None, Some("Edited".to_string()));

        assert_eq!(post.title, "Title");
        assert_eq!(post.content, "Edited");
        assert_eq!(post.author_id, author);
        assert!(post.updated_at >= post.created_at);
    }
}
