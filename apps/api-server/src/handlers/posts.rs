//! Post handlers. Reading and writing require authentication; deletion
//! additionally runs the ownership/staff rule.

use actix_web::{HttpResponse, http::header, web};
use uuid::Uuid;

use quill_core::domain::Post;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};
use quill_shared::MessageResponse;
use quill_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn location_of(post_id: Uuid) -> (header::HeaderName, String) {
    (header::LOCATION, format!("/posts/{post_id}"))
}

/// GET /posts/
pub async fn list(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_newest_first().await?;

    let body: Vec<PostResponse> = posts.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_by_id(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.find_with_author(id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(PostResponse::from(row))),
        None => Err(AppError::NotFound("Post not found".to_string())),
    }
}

/// GET /posts/author/{username}
///
/// An author with zero posts is reported as not-found, not as an empty list.
pub async fn get_by_author(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let posts = state.posts.find_by_author(user.id).await?;
    if posts.is_empty() {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let body: Vec<PostResponse> = posts
        .into_iter()
        .map(|p| PostResponse::project(p, user.username.clone()))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /posts/create
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = body.into_inner().validate()?;

    // Author comes from the identity, never the payload
    let post = Post::new(identity.id, new_post.title, new_post.content);
    let saved = state.posts.insert(post).await?;

    tracing::debug!(post_id = %saved.id, author = %identity.username, "Post created");

    Ok(HttpResponse::Created()
        .insert_header(location_of(saved.id))
        .json(PostResponse::project(saved, identity.username.clone())))
}

/// PATCH /posts/update/{id}
///
/// Accepts any subset of {title, content}; unspecified fields are left
/// unchanged. Any authenticated user may edit any post - deletion is the
/// only operation gated on authorship, which is inconsistent but is the
/// documented behavior of this API.
pub async fn update(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    // Absence wins over a bad payload
    let (mut post, author) = state
        .posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let patch = body.into_inner().validate()?;

    post.apply_patch(patch.title, patch.content);

    let saved = match state.posts.update(post).await {
        Ok(saved) => saved,
        // Deleted between the read and the write
        Err(RepoError::NotFound) => {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(HttpResponse::Created()
        .insert_header(location_of(saved.id))
        .json(PostResponse::project(saved, author.username)))
}

/// DELETE /posts/delete/{id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if !identity.may_delete(post.author_id) {
        return Err(AppError::Unauthorized(
            "Access denied. Only the author or staff can delete a post".to_string(),
        ));
    }

    match state.posts.delete(id).await {
        Ok(()) => {}
        // Lost a concurrent-delete race
        Err(RepoError::NotFound) => {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(post_id = %id, requester = %identity.username, "Post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "The post \"{}\" was successfully deleted",
        post.title
    ))))
}
