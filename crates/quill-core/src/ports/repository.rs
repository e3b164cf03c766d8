use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard record operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity. `RepoError::NotFound` if no row matches.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. `RepoError::NotFound` if already gone,
    /// which is how a lost concurrent-delete race surfaces.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Listings resolve the author alongside each post so the
/// projection layer can emit the author's username.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts with their authors, newest first.
    async fn list_newest_first(&self) -> Result<Vec<(Post, User)>, RepoError>;

    /// A single post with its author.
    async fn find_with_author(&self, id: Uuid) -> Result<Option<(Post, User)>, RepoError>;

    /// All posts by one author, newest first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// All comments with their authors, newest first.
    async fn list_newest_first(&self) -> Result<Vec<(Comment, User)>, RepoError>;

    /// All comments on one post with their authors, oldest first.
    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<(Comment, User)>, RepoError>;
}
