use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use super::domain::{
    normalize_email, LoginRequest, ProfileUpdate, RegisterRequest, Role, User, UserProfile,
};
use crate::board::auth::{hash_password, verify_password, CredentialError, IssuedToken};
use crate::board::auth::{TokenError, TokenIssuer};
use crate::board::ids::UserId;
use crate::board::input::{present, present_scalar};
use crate::board::response::{failure, internal_error};
use crate::board::store::{RepositoryError, UserRepository};

/// Registration, login and profile updates over the identity store.
pub struct IdentityService<U> {
    users: Arc<U>,
    tokens: Arc<TokenIssuer>,
}

impl<U> IdentityService<U>
where
    U: UserRepository + 'static,
{
    pub fn new(users: Arc<U>, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, tokens }
    }

    pub fn register(&self, request: RegisterRequest) -> Result<User, IdentityError> {
        let (Some(fullname), Some(email), Some(password), Some(phone_number), Some(role)) = (
            present(request.fullname),
            present(request.email),
            request.password.filter(|password| !password.is_empty()),
            present_scalar(request.phone_number),
            present(request.role),
        ) else {
            return Err(IdentityError::MissingFields);
        };

        let role: Role = role.parse().map_err(|_| IdentityError::InvalidRole)?;
        let email = normalize_email(&email);
        if self.users.user_by_email(&email)?.is_some() {
            return Err(IdentityError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: UserId::generate(),
            fullname,
            email,
            password_hash: hash_password(&password)?,
            phone_number,
            role,
            profile: UserProfile::default(),
            created_at: now,
            updated_at: now,
        };

        let stored = self.users.insert_user(user).map_err(|err| match err {
            RepositoryError::Conflict(_) => IdentityError::EmailTaken,
            other => IdentityError::Repository(other),
        })?;

        tracing::info!(user_id = %stored.id, role = %stored.role, "user registered");
        Ok(stored)
    }

    /// Verify credentials and issue a session token.
    pub fn login(&self, request: LoginRequest) -> Result<(User, IssuedToken), IdentityError> {
        let (Some(email), Some(password), Some(role)) = (
            present(request.email),
            request.password.filter(|password| !password.is_empty()),
            present(request.role),
        ) else {
            return Err(IdentityError::MissingFields);
        };

        let user = self
            .users
            .user_by_email(&normalize_email(&email))?
            .ok_or(IdentityError::InvalidCredentials)?;

        if !verify_password(&password, &user.password_hash)? {
            return Err(IdentityError::InvalidCredentials);
        }

        if role.parse::<Role>().ok() != Some(user.role) {
            return Err(IdentityError::RoleMismatch);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok((user, token))
    }

    pub fn update_profile(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<User, IdentityError> {
        let fullname = present(update.fullname);
        let email = present(update.email).map(|email| normalize_email(&email));
        let phone_number = present_scalar(update.phone_number);
        let bio = present(update.bio);
        let skills = update.skills.map(|skills| skills.into_items());
        let resume = present(update.resume);
        let resume_original_name = present(update.resume_original_name);
        let profile_picture = present(update.profile_picture);

        let nothing_to_update = fullname.is_none()
            && email.is_none()
            && phone_number.is_none()
            && bio.is_none()
            && skills.is_none()
            && resume.is_none()
            && profile_picture.is_none();
        if nothing_to_update {
            return Err(IdentityError::EmptyUpdate);
        }

        let mut user = self.users.user(user_id)?.ok_or(IdentityError::NotFound)?;

        if let Some(fullname) = fullname {
            user.fullname = fullname;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(phone_number) = phone_number {
            user.phone_number = phone_number;
        }
        if let Some(bio) = bio {
            user.profile.bio = bio;
        }
        if let Some(skills) = skills {
            user.profile.skills = skills;
        }
        if let Some(resume) = resume {
            user.profile.resume = resume;
            user.profile.resume_original_name = resume_original_name.unwrap_or_default();
        }
        if let Some(profile_picture) = profile_picture {
            user.profile.profile_picture = profile_picture;
        }
        user.updated_at = Utc::now();

        let stored = self.users.update_user(user).map_err(|err| match err {
            RepositoryError::Conflict(_) => IdentityError::EmailTaken,
            RepositoryError::NotFound => IdentityError::NotFound,
            other => IdentityError::Repository(other),
        })?;

        tracing::debug!(user_id = %stored.id, "profile updated");
        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid role")]
    InvalidRole,
    #[error("User already exists")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid role")]
    RoleMismatch,
    #[error("At least one field must be provided to update")]
    EmptyUpdate,
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        match self {
            IdentityError::MissingFields
            | IdentityError::InvalidRole
            | IdentityError::EmailTaken
            | IdentityError::InvalidCredentials
            | IdentityError::RoleMismatch
            | IdentityError::EmptyUpdate => failure(StatusCode::BAD_REQUEST, self.to_string()),
            IdentityError::NotFound => failure(StatusCode::NOT_FOUND, self.to_string()),
            IdentityError::Credential(_)
            | IdentityError::Token(_)
            | IdentityError::Repository(_) => internal_error("identity", &self),
        }
    }
}
