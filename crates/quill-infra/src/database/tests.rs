use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn user_model(username: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        email: None,
        password_hash: "hash".to_owned(),
        is_staff: false,
        is_superuser: false,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post::Model {
            id: post_id,
            author_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.id, post_id);
    assert_eq!(found.author_id, author_id);
}

#[tokio::test]
async fn test_find_user_by_username() {
    let model = user_model("jane");
    let expected_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result: Option<User> = repo.find_by_username("jane").await.unwrap();
    assert_eq!(result.unwrap().id, expected_id);
}

#[tokio::test]
async fn test_find_by_author_maps_rows() {
    let author_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post::Model {
                id: Uuid::new_v4(),
                author_id,
                title: "Newer".to_owned(),
                content: "b".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            },
            post::Model {
                id: Uuid::new_v4(),
                author_id,
                title: "Older".to_owned(),
                content: "a".to_owned(),
                created_at: now.into(),
                updated_at: now.into(),
            },
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let posts = repo.find_by_author(author_id).await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Newer");
}

#[tokio::test]
async fn test_delete_missing_row_maps_to_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let err = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}
