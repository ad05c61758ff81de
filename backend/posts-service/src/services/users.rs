/// User service - account sign-up and sign-in
use crate::domain::{NewUser, User};
use crate::error::{AppError, Result};
use crate::repository::UserRepository;
use crate::security::{hash_password, verify_password, TokenKeys};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Account plus a bearer token for it
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub result: User,
    pub token: String,
}

pub struct UserService {
    repo: Arc<dyn UserRepository>,
    keys: Arc<TokenKeys>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: Arc<TokenKeys>) -> Self {
        Self { repo, keys }
    }

    pub async fn sign_up(&self, req: SignUpRequest) -> Result<AuthResponse> {
        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::BadRequest("User already exists".to_string()));
        }

        if req.password != req.confirm_password {
            return Err(AppError::BadRequest("Passwords don't match".to_string()));
        }

        let password_hash = hash_password(&req.password)?;

        // unique index on email catches a concurrent sign-up with the same address
        let user = self
            .repo
            .insert(NewUser {
                name: format!("{} {}", req.first_name, req.last_name),
                email: req.email,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                AppError::Database(e) => AppError::Conflict(e.to_string()),
                other => other,
            })?;

        let token = self.keys.issue(user.id.as_str(), &user.email)?;
        tracing::info!(user_id = %user.id, "user signed up");

        Ok(AuthResponse { result: user, token })
    }

    pub async fn sign_in(&self, req: SignInRequest) -> Result<AuthResponse> {
        let user = self
            .repo
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User doesn't exist".to_string()))?;

        if !verify_password(&req.password, &user.password_hash)? {
            return Err(AppError::BadRequest("Invalid credentials".to_string()));
        }

        let token = self.keys.issue(user.id.as_str(), &user.email)?;
        tracing::debug!(user_id = %user.id, "user signed in");

        Ok(AuthResponse { result: user, token })
    }
}
