use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::Router;
use serde_json::json;

use super::domain::CompanyDraft;
use super::service::CompanyServiceError;
use crate::board::auth::Session;
use crate::board::body::JsonBody;
use crate::board::ids::CompanyId;
use crate::board::response::success;
use crate::board::store::DocumentStore;
use crate::board::BoardState;

pub(crate) fn routes<S>() -> Router<BoardState<S>>
where
    S: DocumentStore,
{
    Router::new()
        .route("/register", post(register_handler::<S>))
        .route("/get-companies", get(list_handler::<S>))
        .route("/get-company/:id", get(get_handler::<S>))
        .route("/update-company/:id", put(update_handler::<S>))
}

fn parse_company_id(raw: &str) -> Result<CompanyId, CompanyServiceError> {
    raw.parse().map_err(|_| CompanyServiceError::InvalidId)
}

pub(crate) async fn register_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
    JsonBody(draft): JsonBody<CompanyDraft>,
) -> Result<Response, CompanyServiceError>
where
    S: DocumentStore,
{
    let company = board.companies.register(&session.user, draft)?;
    Ok(success(
        StatusCode::CREATED,
        "Company registered successfully",
        json!({ "company": company }),
    ))
}

pub(crate) async fn list_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
) -> Result<Response, CompanyServiceError>
where
    S: DocumentStore,
{
    let companies = board.companies.owned_by(&session.user)?;
    Ok(success(
        StatusCode::OK,
        "Companies retrieved successfully",
        json!({ "companies": companies }),
    ))
}

pub(crate) async fn get_handler<S>(
    State(board): State<BoardState<S>>,
    _session: Session,
    Path(company_id): Path<String>,
) -> Result<Response, CompanyServiceError>
where
    S: DocumentStore,
{
    let company = board.companies.get(&parse_company_id(&company_id)?)?;
    Ok(success(
        StatusCode::OK,
        "Company retrieved successfully",
        json!({ "company": company }),
    ))
}

pub(crate) async fn update_handler<S>(
    State(board): State<BoardState<S>>,
    session: Session,
    Path(company_id): Path<String>,
    JsonBody(draft): JsonBody<CompanyDraft>,
) -> Result<Response, CompanyServiceError>
where
    S: DocumentStore,
{
    let id = parse_company_id(&company_id)?;
    let company = board.companies.update(&session.user, &id, draft)?;
    Ok(success(
        StatusCode::OK,
        "Company updated successfully",
        json!({ "company": company }),
    ))
}
