use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

use crate::board::response::failure;

/// JSON request body whose rejections answer with the `{ message, success }` envelope.
///
/// Wrong content types, malformed JSON and payloads of the wrong shape all map to 400.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct JsonBody<T>(pub(crate) T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    reason = %rejection.body_text(),
                    "request body rejected"
                );
                Err(failure(StatusCode::BAD_REQUEST, "Invalid request body"))
            }
        }
    }
}
