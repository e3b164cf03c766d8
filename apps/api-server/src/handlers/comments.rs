//! Comment handlers. Comments are created against an existing post and
//! deleted under the same ownership/staff rule as posts; there is no update.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Comment;
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, CommentRepository};
use quill_shared::MessageResponse;
use quill_shared::dto::{CommentResponse, CreateCommentRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /comments/
pub async fn list(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let comments = state.comments.list_newest_first().await?;

    let body: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /comments/posts/{post_id}
///
/// A post with zero comments is reported as not-found, not as an empty
/// list; whether the post itself exists is not consulted.
pub async fn get_by_post(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let comments = state.comments.find_by_post(post_id).await?;
    if comments.is_empty() {
        return Err(AppError::NotFound("Comments not found".to_string()));
    }

    let body: Vec<CommentResponse> = comments.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /comments/posts/{post_id}/create
pub async fn create(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    // The parent must exist before anything is persisted
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let new_comment = body.into_inner().validate()?;

    // Author from the identity, parent from the resolved post
    let comment = Comment::new(identity.id, post.id, new_comment.content);
    let saved = state.comments.insert(comment).await?;

    tracing::debug!(comment_id = %saved.id, post_id = %post.id, "Comment created");

    Ok(HttpResponse::Created()
        .json(CommentResponse::project(saved, identity.username.clone())))
}

/// DELETE /comments/delete/{comment_id}
pub async fn delete(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();

    let comment = state
        .comments
        .find_by_id(comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

    if !identity.may_delete(comment.author_id) {
        return Err(AppError::Unauthorized(
            "Access denied. Only the author or staff can delete a comment".to_string(),
        ));
    }

    match state.comments.delete(comment_id).await {
        Ok(()) => {}
        Err(RepoError::NotFound) => {
            return Err(AppError::NotFound("Comment not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    tracing::info!(comment_id = %comment_id, requester = %identity.username, "Comment deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "The comment \"{}\" was successfully deleted",
        comment.content
    ))))
}
