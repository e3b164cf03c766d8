//! User registration and login handlers. The only anonymous operations in
//! the API.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use quill_core::domain::User;
use quill_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use quill_shared::FieldErrors;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /user/registration/
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let new_user = body.into_inner().validate()?;

    // Duplicate usernames are a per-field error, same as a missing one
    if state
        .users
        .find_by_username(&new_user.username)
        .await?
        .is_some()
    {
        let mut errors = FieldErrors::new();
        errors.add("username", "A user with that username already exists.");
        return Err(errors.into());
    }

    // Hash before anything reaches the store; the plaintext stops here
    let password_hash = password_service.hash(&new_user.password)?;

    let user = User::new(new_user.username, new_user.email, password_hash);
    let saved = state.users.insert(user).await?;

    tracing::info!(username = %saved.username, "User registered");

    Ok(HttpResponse::Created().json(UserResponse::from(saved)))
}

/// POST /user/login/
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(AppError::not_authenticated)?;

    let valid = password_service.verify(&req.password, &user.password_hash)?;
    if !valid {
        return Err(AppError::not_authenticated());
    }

    let token = token_service.generate_token(user.id, &user.username, user.roles())?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    }))
}
