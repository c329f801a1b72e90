use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::json;

use super::domain::JobDraft;
use super::service::JobServiceError;
use crate::board::auth::Session;
use crate::board::body::JsonBody;
use crate::board::ids::JobId;
use crate::board::response::success;
use crate::board::store::DocumentStore;
use crate::board::BoardState;

pub(crate) fn routes<S>() -> Router<BoardState<S>>
where
    S: DocumentStore,
{
    Router::new()
        .route("/create", post(create_handler::<S>))
        .route("/get", get(search_handler::<S>))
        .route("/get/:id", get(detail_handler::<S>))
        .route("/getAdminJobs", get(admin_jobs_handler::<S>))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    pub(crate) keyword: Option<String>,
}

pub(crate) async fn create_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
    JsonBody(draft): JsonBody<JobDraft>,
) -> Result<Response, JobServiceError>
where
    S: DocumentStore,
{
    let job = board.jobs.create(&session.user, draft)?;
    Ok(success(
        StatusCode::CREATED,
        "Job created successfully",
        json!({ "job": job }),
    ))
}

pub(crate) async fn search_handler<S>(
    State(board): State<BoardState<S>>,
    Query(params): Query<SearchParams>,
) -> Result<Response, JobServiceError>
where
    S: DocumentStore,
{
    let jobs = board.jobs.search(params.keyword)?;
    Ok(success(
        StatusCode::OK,
        "Jobs fetched successfully",
        json!({ "jobs": jobs }),
    ))
}

pub(crate) async fn detail_handler<S>(
    State(board): State<BoardState<S>>,
    Path(job_id): Path<String>,
) -> Result<Response, JobServiceError>
where
    S: DocumentStore,
{
    let id: JobId = job_id.parse().map_err(|_| JobServiceError::InvalidJobId)?;
    let job = board.jobs.detail(&id)?;
    Ok(success(
        StatusCode::OK,
        "Job fetched successfully",
        json!({ "job": job }),
    ))
}

pub(crate) async fn admin_jobs_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
) -> Result<Response, JobServiceError>
where
    S: DocumentStore,
{
    let jobs = board.jobs.posted_by(&session.user)?;
    Ok(success(
        StatusCode::OK,
        "Jobs fetched successfully",
        json!({ "jobs": jobs }),
    ))
}
