use async_trait::async_trait;

use crate::food::recipe::User;
use crate::providers::traits::{AuthError, Authenticator, Session};

/// Offline stand-in for the hosted auth service. Any non-empty bearer token
/// is accepted and used as the user id; sign-in hands back the email as the
/// token. Never expose this outside local development.
#[derive(Debug, Clone, Default)]
pub struct DevAuth;

fn session_for(email: &str) -> Result<Session, AuthError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(Session {
        access_token: email.to_string(),
        user: User {
            id: email.to_string(),
            email: Some(email.to_string()),
        },
    })
}

#[async_trait]
impl Authenticator for DevAuth {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<Option<Session>, AuthError> {
        session_for(email).map(Some)
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<Session, AuthError> {
        session_for(email)
    }

    async fn user_for_token(&self, token: &str) -> Result<User, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(User {
            id: token.to_string(),
            email: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_is_the_user_id() {
        let auth = DevAuth;
        assert_eq!(auth.user_for_token("cook-7").await.unwrap().id, "cook-7");
        assert!(matches!(auth.user_for_token(" ").await, Err(AuthError::InvalidToken)));

        let session = auth.sign_in("me@example.com", "pw").await.unwrap();
        assert_eq!(session.access_token, "me@example.com");
        assert!(auth.sign_in("", "pw").await.is_err());
    }
}
