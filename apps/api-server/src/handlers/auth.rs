//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use folio_core::domain::User;
use folio_core::ports::{BaseRepository, PasswordService, TokenService};
use folio_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::resources::user_resource;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

fn validate_registration(req: &RegisterUserRequest) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    if req.name.trim().is_empty() {
        errors.push("name: must not be blank".to_string());
    }
    if req.email.is_empty() || !req.email.contains('@') {
        errors.push("email: must be a valid email address".to_string());
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "password: must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn bearer(token_service: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let token = token_service
        .generate_token(user.id, &user.email)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    })
}

/// POST /auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_registration(&req).map_err(AppError::Validation)?;

    if state.users.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .insert(User::new(req.name.trim().to_string(), req.email, password_hash))
        .await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(bearer(token_service.get_ref().as_ref(), &user)?))
}

/// POST /auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        tracing::warn!(user_id = %user.id, "Failed login attempt");
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(bearer(token_service.get_ref().as_ref(), &user)?))
}

/// GET /auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(user_resource(&user)))
}
