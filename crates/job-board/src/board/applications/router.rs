use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::json;

use super::domain::{StatusDecision, StatusUpdateRequest};
use super::service::ApplicationServiceError;
use crate::board::auth::Session;
use crate::board::response::success;
use crate::board::store::DocumentStore;
use crate::board::BoardState;

pub(crate) fn routes<S>() -> Router<BoardState<S>>
where
    S: DocumentStore,
{
    Router::new()
        .route(
            "/apply/:id",
            get(apply_handler::<S>).post(apply_handler::<S>),
        )
        .route("/get", get(applied_jobs_handler::<S>))
        .route("/:id/applicants", get(applicants_handler::<S>))
        .route("/status/:id/update", put(update_status_handler::<S>))
}

pub(crate) async fn apply_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
    Path(job_id): Path<String>,
) -> Result<Response, ApplicationServiceError>
where
    S: DocumentStore,
{
    let job_id = job_id
        .parse()
        .map_err(|_| ApplicationServiceError::InvalidJobId)?;
    let submitted = board.applications.submit(&session.user, &job_id)?;
    Ok(success(
        StatusCode::CREATED,
        "Application submitted successfully.",
        json!({
            "application": submitted.application,
            "totalApplicants": submitted.total_applicants,
        }),
    ))
}

pub(crate) async fn applied_jobs_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
) -> Result<Response, ApplicationServiceError>
where
    S: DocumentStore,
{
    let applications = board.applications.applied_jobs(&session.user)?;
    Ok(success(
        StatusCode::OK,
        "Applications fetched successfully.",
        json!({ "applications": applications }),
    ))
}

pub(crate) async fn applicants_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
    Path(job_id): Path<String>,
) -> Result<Response, ApplicationServiceError>
where
    S: DocumentStore,
{
    let job_id = job_id
        .parse()
        .map_err(|_| ApplicationServiceError::InvalidJobId)?;
    let applicants = board.applications.applicants(&session.user, &job_id)?;
    Ok(success(
        StatusCode::OK,
        "Applicants fetched successfully.",
        json!({ "applicants": applicants }),
    ))
}

/// The decision token is validated before the application id.
pub(crate) async fn update_status_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
    Path(application_id): Path<String>,
    body: Option<Json<StatusUpdateRequest>>,
) -> Result<Response, ApplicationServiceError>
where
    S: DocumentStore,
{
    let decision: StatusDecision = body
        .and_then(|Json(request)| request.status)
        .ok_or(ApplicationServiceError::InvalidStatus)?
        .parse()
        .map_err(|_| ApplicationServiceError::InvalidStatus)?;
    let application_id = application_id
        .parse()
        .map_err(|_| ApplicationServiceError::InvalidApplicationId)?;

    let application = board
        .applications
        .update_status(&session.user, &application_id, decision)?;
    Ok(success(
        StatusCode::OK,
        "Application status updated successfully.",
        json!({ "application": application }),
    ))
}
