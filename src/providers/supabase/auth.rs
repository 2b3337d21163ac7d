use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::SupabaseConfig;
use crate::food::recipe::User;
use crate::providers::traits::{AuthError, Authenticator, Session};

/// GoTrue endpoints of a Supabase project.
#[derive(Clone)]
pub struct SupabaseAuth {
    config: SupabaseConfig,
    client: Client,
}

impl SupabaseAuth {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    async fn post(&self, path: &str, email: &str, password: &str) -> Result<Response, AuthError> {
        let request = self
            .client
            .post(self.config.endpoint(path))
            .json(&json!({ "email": email, "password": password }));
        Ok(self
            .config
            .with_key(request, &self.config.anon_key)
            .send()
            .await?)
    }
}

/// GoTrue reports failures under a few different keys depending on version.
fn error_message(body: &Value) -> String {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .unwrap_or("Authentication failed")
        .to_string()
}

fn session_from(body: Value) -> Result<Option<Session>, AuthError> {
    let Some(token) = body.get("access_token").and_then(Value::as_str) else {
        return Ok(None);
    };
    let user: User = body
        .get("user")
        .cloned()
        .and_then(|u| serde_json::from_value(u).ok())
        .ok_or_else(|| AuthError::Rejected("Session without a user".to_string()))?;
    Ok(Some(Session {
        access_token: token.to_string(),
        user,
    }))
}

#[async_trait]
impl Authenticator for SupabaseAuth {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError> {
        let response = self.post("auth/v1/signup", email, password).await?;
        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            warn!("Sign-up rejected with {}", status);
            return Err(AuthError::Rejected(error_message(&body)));
        }

        let session = session_from(body)?;
        if session.is_none() {
            info!("Sign-up for {} awaits email confirmation", email);
        }
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .post("auth/v1/token?grant_type=password", email, password)
            .await?;
        let status = response.status();
        let body: Value = response.json().await?;
        match status {
            s if s.is_success() => session_from(body)?
                .ok_or_else(|| AuthError::Rejected("No session returned".to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(AuthError::InvalidCredentials),
            _ => Err(AuthError::Rejected(error_message(&body))),
        }
    }

    async fn user_for_token(&self, token: &str) -> Result<User, AuthError> {
        let request = self.client.get(self.config.endpoint("auth/v1/user"));
        let response = self.config.with_key(request, token).send().await?;
        match response.status() {
            s if s.is_success() => response
                .json::<User>()
                .await
                .map_err(|_| AuthError::InvalidToken),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthError::InvalidToken),
            s => Err(AuthError::Rejected(format!("Auth service returned {}", s))),
        }
    }
}
