//! In-memory repositories - used as fallback when no database is configured,
//! and as the store behind the HTTP integration tests.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Comment, Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{
    BaseRepository, CommentRepository, PostRepository, UserRepository,
};

/// Shared backing store for the in-memory repositories. One instance is
/// shared by the user/post/comment repositories so listings can resolve
/// authors, mirroring the relational joins of the Postgres implementation.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    posts: RwLock<HashMap<Uuid, Post>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        // Unique-username enforcement happens inside the write lock, the
        // in-memory stand-in for the storage-layer constraint.
        let mut users = self.store.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.store.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .store
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryPostRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.store.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.store.posts.write().await;
        if !posts.contains_key(&post.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_newest_first(&self) -> Result<Vec<(Post, User)>, RepoError> {
        let users = self.store.users.read().await;
        let posts = self.store.posts.read().await;

        let mut rows: Vec<(Post, User)> = posts
            .values()
            .filter_map(|p| users.get(&p.author_id).map(|u| (p.clone(), u.clone())))
            .collect();
        rows.sort_by(|(a, _), (b, _)| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<(Post, User)>, RepoError> {
        let users = self.store.users.read().await;
        let posts = self.store.posts.read().await;

        Ok(posts
            .get(&id)
            .and_then(|p| users.get(&p.author_id).map(|u| (p.clone(), u.clone()))))
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let posts = self.store.posts.read().await;

        let mut rows: Vec<Post> = posts
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    store: Arc<MemoryStore>,
}

impl InMemoryCommentRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.store.comments.read().await.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.store
            .comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut comments = self.store.comments.write().await;
        if !comments.contains_key(&comment.id) {
            return Err(RepoError::NotFound);
        }
        comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.store
            .comments
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_newest_first(&self) -> Result<Vec<(Comment, User)>, RepoError> {
        let users = self.store.users.read().await;
        let comments = self.store.comments.read().await;

        let mut rows: Vec<(Comment, User)> = comments
            .values()
            .filter_map(|c| users.get(&c.author_id).map(|u| (c.clone(), u.clone())))
            .collect();
        rows.sort_by(|(a, _), (b, _)| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_by_post(&self, post_id: Uuid) -> Result<Vec<(Comment, User)>, RepoError> {
        let users = self.store.users.read().await;
        let comments = self.store.comments.read().await;

        let mut rows: Vec<(Comment, User)> = comments
            .values()
            .filter(|c| c.post_id == post_id)
            .filter_map(|c| users.get(&c.author_id).map(|u| (c.clone(), u.clone())))
            .collect();
        rows.sort_by(|(a, _), (b, _)| a.created_at.cmp(&b.created_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_user(name: &str) -> User {
        User::new(name.to_string(), None, "hash".to_string())
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_username() {
        let store = MemoryStore::new();
        let repo = InMemoryUserRepository::new(store);

        repo.insert(seed_user("jane")).await.unwrap();
        let err = repo.insert(seed_user("jane")).await.unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let store = MemoryStore::new();
        let repo = InMemoryUserRepository::new(store);

        let jane = repo.insert(seed_user("jane")).await.unwrap();
        let found = repo.find_by_username("jane").await.unwrap().unwrap();
        assert_eq!(found.id, jane.id);
        assert!(repo.find_by_username("john").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_posts_list_newest_first() {
        let store = MemoryStore::new();
        let users = InMemoryUserRepository::new(store.clone());
        let posts = InMemoryPostRepository::new(store);

        let jane = users.insert(seed_user("jane")).await.unwrap();
        let first = posts
            .insert(Post::new(jane.id, "First".to_string(), "a".to_string()))
            .await
            .unwrap();
        let mut second = Post::new(jane.id, "Second".to_string(), "b".to_string());
        second.created_at = first.created_at + chrono::TimeDelta::seconds(1);
        posts.insert(second).await.unwrap();

        let listed = posts.list_newest_first().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].0.title, "Second");
        assert_eq!(listed[1].0.title, "First");
        assert_eq!(listed[0].1.username, "jane");
    }

    #[tokio::test]
    async fn test_find_by_post_filters_and_orders_oldest_first() {
        let store = MemoryStore::new();
        let users = InMemoryUserRepository::new(store.clone());
        let posts = InMemoryPostRepository::new(store.clone());
        let comments = InMemoryCommentRepository::new(store);

        let jane = users.insert(seed_user("jane")).await.unwrap();
        let post = posts
            .insert(Post::new(jane.id, "T".to_string(), "C".to_string()))
            .await
            .unwrap();
        let other = posts
            .insert(Post::new(jane.id, "Other".to_string(), "C".to_string()))
            .await
            .unwrap();

        let first = comments
            .insert(Comment::new(jane.id, post.id, "first".to_string()))
            .await
            .unwrap();
        let mut second = Comment::new(jane.id, post.id, "second".to_string());
        second.created_at = first.created_at + chrono::TimeDelta::seconds(1);
        comments.insert(second).await.unwrap();
        comments
            .insert(Comment::new(jane.id, other.id, "elsewhere".to_string()))
            .await
            .unwrap();

        let thread = comments.find_by_post(post.id).await.unwrap();
        assert_eq!(thread.len(), 2);
        assert_eq!(thread[0].0.content, "first");
        assert_eq!(thread[1].0.content, "second");
    }

    #[tokio::test]
    async fn test_second_delete_reports_not_found() {
        let store = MemoryStore::new();
        let users = InMemoryUserRepository::new(store.clone());
        let posts = InMemoryPostRepository::new(store);

        let jane = users.insert(seed_user("jane")).await.unwrap();
        let post = posts
            .insert(Post::new(jane.id, "T".to_string(), "C".to_string()))
            .await
            .unwrap();

        posts.delete(post.id).await.unwrap();
        assert!(matches!(
            posts.delete(post.id).await.unwrap_err(),
            RepoError::NotFound
        ));
    }
}
