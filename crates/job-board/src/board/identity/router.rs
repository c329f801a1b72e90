use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::Router;
use serde_json::json;

use super::domain::{LoginRequest, ProfileUpdate, RegisterRequest};
use super::service::IdentityError;
use crate::board::auth::Session;
use crate::board::body::JsonBody;
use crate::board::response::success;
use crate::board::store::DocumentStore;
use crate::board::BoardState;

pub(crate) fn routes<S>() -> Router<BoardState<S>>
where
    S: DocumentStore,
{
    Router::new()
        .route("/signUp", post(register_handler::<S>))
        .route("/login", post(login_handler::<S>))
        .route("/logout", delete(logout_handler))
        .route("/update-profile", put(update_profile_handler::<S>))
        .route("/get-user-profile", get(profile_handler))
        .route("/verify-token", get(verify_token_handler))
}

pub(crate) async fn register_handler<S>(
    State(board): State<BoardState<S>>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<Response, IdentityError>
where
    S: DocumentStore,
{
    let user = board.identity.register(request)?;
    Ok(success(
        StatusCode::CREATED,
        "User registered successfully",
        json!({ "user": user.view() }),
    ))
}

pub(crate) async fn login_handler<S>(
    State(board): State<BoardState<S>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Response, IdentityError>
where
    S: DocumentStore,
{
    let (user, issued) = board.identity.login(request)?;
    Ok(success(
        StatusCode::OK,
        "Login successful",
        json!({
            "user": user.view(),
            "token": issued.token,
            "expiresAt": issued.expires_at,
        }),
    ))
}

/// Tokens are stateless; the client drops its credential.
pub(crate) async fn logout_handler() -> Response {
    success(StatusCode::OK, "Logout successful", json!({}))
}

pub(crate) async fn update_profile_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
    JsonBody(update): JsonBody<ProfileUpdate>,
) -> Result<Response, IdentityError>
where
    S: DocumentStore,
{
    let user = board.identity.update_profile(&session.user_id(), update)?;
    Ok(success(
        StatusCode::OK,
        "Profile updated successfully",
        json!({ "user": user.view() }),
    ))
}

pub(crate) async fn profile_handler(session: Session) -> Response {
    success(
        StatusCode::OK,
        "User data fetched successfully",
        json!({ "user": session.user.view() }),
    )
}

pub(crate) async fn verify_token_handler(session: Session) -> Response {
    success(
        StatusCode::OK,
        "Token is valid",
        json!({ "user": session.user.view() }),
    )
}
