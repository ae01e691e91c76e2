use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    routes::{AppJson, AppState},
    services::auth::{hash_password, verify_password, TokenPair, TokenType},
};

const USERNAME_TAKEN: &str = "Username already taken, please choose a different one";

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    fn into_parts(self) -> AppResult<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Ok((username, password))
            }
            _ => Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub access: String,
}

/// Handler for user registration
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let (username, password) = request.into_parts()?;

    if state.store.find_user_by_username(&username).await?.is_some() {
        return Err(AppError::InvalidInput(USERNAME_TAKEN.to_string()));
    }

    let password_hash = hash_password(&password)?;
    let user = state
        .store
        .create_user(&username, &password_hash)
        .await
        .map_err(|e| match e {
            AppError::Conflict(_) => AppError::InvalidInput(USERNAME_TAKEN.to_string()),
            other => other,
        })?;

    tracing::info!(user = user.id, username = %user.username, "User registered");

    let tokens = state.tokens.issue_pair(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            tokens,
        }),
    ))
}

/// Handler for exchanging credentials for a token pair
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<CredentialsRequest>,
) -> AppResult<Json<TokenPair>> {
    let (username, password) = request.into_parts()?;
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&password, &user.password_hash) {
        return Err(invalid());
    }

    Ok(Json(state.tokens.issue_pair(user.id)?))
}

/// Handler for minting a new access token from a refresh token
pub async fn refresh(
    State(state): State<AppState>,
    AppJson(request): AppJson<RefreshRequest>,
) -> AppResult<Json<AccessResponse>> {
    let claims = state.tokens.validate(&request.refresh, TokenType::Refresh)?;

    if state.store.find_user_by_id(claims.sub).await?.is_none() {
        return Err(AppError::Unauthorized("User not found".to_string()));
    }

    Ok(Json(AccessResponse {
        access: state.tokens.issue_access(claims.sub)?,
    }))
}
