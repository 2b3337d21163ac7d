use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::food::recipe::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A hosted chat model.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends the conversation and returns the first choice's text.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;

    fn model_name(&self) -> &str;
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid or expired session")]
    InvalidToken,
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Rejected(String),
    #[error("Auth service unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub access_token: String,
    pub user: User,
}

/// Sign-up, sign-in and token checks, delegated to an identity provider.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// `None` when the provider wants the address confirmed first.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn user_for_token(&self, token: &str) -> Result<User, AuthError>;
}
