use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};
use validator::Validate;

use super::{
    error::{ApiError, JsonBody},
    AppState,
};
use crate::food::recipe::User;

/// The caller, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
        let user = state.auth.user_for_token(token).await?;
        debug!("Authenticated {}", user.id);
        Ok(AuthUser(user))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

pub async fn signup_handler(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): JsonBody<Credentials>,
) -> Result<Response, ApiError> {
    credentials.validate()?;
    match state.auth.sign_up(&credentials.email, &credentials.password).await? {
        Some(session) => {
            info!("Signed up {}", session.user.id);
            Ok((StatusCode::CREATED, Json(session)).into_response())
        }
        None => Ok((
            StatusCode::ACCEPTED,
            Json(json!({ "message": "Check your email to confirm your account" })),
        )
            .into_response()),
    }
}

pub async fn login_handler(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): JsonBody<Credentials>,
) -> Result<Response, ApiError> {
    let session = state
        .auth
        .sign_in(&credentials.email, &credentials.password)
        .await?;
    info!("Logged in {}", session.user.id);
    Ok(Json(session).into_response())
}
