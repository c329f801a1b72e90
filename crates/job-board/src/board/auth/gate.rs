use std::sync::Arc;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use super::token::{TokenError, TokenIssuer};
use crate::board::identity::User;
use crate::board::ids::UserId;
use crate::board::response::{failure, internal_error};
use crate::board::store::{RepositoryError, UserRepository};

/// Resolves a bearer credential to a user, failing closed.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<User, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Unauthorized: No token provided")]
    MissingCredential,
    #[error("Unauthorized: Invalid or expired token")]
    InvalidCredential(#[source] TokenError),
    #[error("Unauthorized: User no longer exists")]
    UnknownUser,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::Repository(err) => internal_error("authenticate", &err),
            denied => {
                tracing::warn!(reason = %denied, "authentication denied");
                failure(StatusCode::UNAUTHORIZED, denied.to_string())
            }
        }
    }
}

/// Token verification backed by the identity store.
pub struct TokenGate<U> {
    tokens: Arc<TokenIssuer>,
    users: Arc<U>,
}

impl<U> TokenGate<U>
where
    U: UserRepository,
{
    pub fn new(tokens: Arc<TokenIssuer>, users: Arc<U>) -> Self {
        Self { tokens, users }
    }
}

impl<U> Authenticator for TokenGate<U>
where
    U: UserRepository,
{
    fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self
            .tokens
            .verify(token)
            .map_err(AuthError::InvalidCredential)?;
        self.users.user(&claims.sub)?.ok_or(AuthError::UnknownUser)
    }
}

/// Caller identity resolved by the gate and handed to handlers as an explicit parameter.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
}

impl Session {
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Arc<dyn Authenticator>: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthError::MissingCredential)?;
        let gate = <Arc<dyn Authenticator> as FromRef<S>>::from_ref(state);
        let user = gate.authenticate(token)?;
        tracing::debug!(user_id = %user.id, role = %user.role, "session resolved");
        Ok(Session { user })
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
