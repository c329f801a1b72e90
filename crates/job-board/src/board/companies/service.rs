use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use super::domain::{Company, CompanyDraft};
use crate::board::identity::{Role, User};
use crate::board::ids::CompanyId;
use crate::board::input::present;
use crate::board::response::{failure, internal_error};
use crate::board::store::{CompanyRepository, RepositoryError};

pub struct CompanyService<R> {
    companies: Arc<R>,
}

impl<R> CompanyService<R>
where
    R: CompanyRepository + 'static,
{
    pub fn new(companies: Arc<R>) -> Self {
        Self { companies }
    }

    pub fn register(
        &self,
        recruiter: &User,
        draft: CompanyDraft,
    ) -> Result<Company, CompanyServiceError> {
        if !recruiter.is(Role::Recruiter) {
            return Err(CompanyServiceError::RecruitersOnly);
        }
        let name = present(draft.name).ok_or(CompanyServiceError::NameRequired)?;

        let now = Utc::now();
        let company = Company {
            id: CompanyId::generate(),
            name,
            description: present(draft.description).unwrap_or_default(),
            website: present(draft.website).unwrap_or_default(),
            location: present(draft.location).unwrap_or_default(),
            logo: present(draft.logo).unwrap_or_default(),
            owner: recruiter.id,
            created_at: now,
            updated_at: now,
        };

        let stored = self
            .companies
            .insert_company(company)
            .map_err(name_conflict)?;
        tracing::info!(company_id = %stored.id, owner = %stored.owner, "company registered");
        Ok(stored)
    }

    /// Companies owned by the caller; an empty registry is reported as not found.
    pub fn owned_by(&self, user: &User) -> Result<Vec<Company>, CompanyServiceError> {
        let companies = self.companies.companies_owned_by(&user.id)?;
        if companies.is_empty() {
            return Err(CompanyServiceError::NoCompanies);
        }
        Ok(companies)
    }

    pub fn get(&self, id: &CompanyId) -> Result<Company, CompanyServiceError> {
        self.companies
            .company(id)?
            .ok_or(CompanyServiceError::NotFound)
    }

    /// Apply non-blank draft fields to a company the caller owns.
    pub fn update(
        &self,
        owner: &User,
        id: &CompanyId,
        draft: CompanyDraft,
    ) -> Result<Company, CompanyServiceError> {
        let mut company = self.get(id)?;
        if !company.is_owned_by(&owner.id) {
            return Err(CompanyServiceError::NotOwner);
        }

        if let Some(name) = present(draft.name) {
            company.name = name;
        }
        if let Some(description) = present(draft.description) {
            company.description = description;
        }
        if let Some(website) = present(draft.website) {
            company.website = website;
        }
        if let Some(location) = present(draft.location) {
            company.location = location;
        }
        if let Some(logo) = present(draft.logo) {
            company.logo = logo;
        }
        company.updated_at = Utc::now();

        let stored = self
            .companies
            .update_company(company)
            .map_err(name_conflict)?;
        tracing::debug!(company_id = %stored.id, "company updated");
        Ok(stored)
    }
}

fn name_conflict(err: RepositoryError) -> CompanyServiceError {
    match err {
        RepositoryError::Conflict(_) => CompanyServiceError::NameTaken,
        RepositoryError::NotFound => CompanyServiceError::NotFound,
        other => CompanyServiceError::Repository(other),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompanyServiceError {
    #[error("Company name is required")]
    NameRequired,
    #[error("Invalid company ID")]
    InvalidId,
    #[error("Company name already exists")]
    NameTaken,
    #[error("Only recruiters can manage companies")]
    RecruitersOnly,
    #[error("You do not own this company")]
    NotOwner,
    #[error("Company not found")]
    NotFound,
    #[error("No companies found")]
    NoCompanies,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for CompanyServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            CompanyServiceError::NameRequired | CompanyServiceError::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            CompanyServiceError::NameTaken => StatusCode::CONFLICT,
            CompanyServiceError::RecruitersOnly | CompanyServiceError::NotOwner => {
                StatusCode::FORBIDDEN
            }
            CompanyServiceError::NotFound | CompanyServiceError::NoCompanies => {
                StatusCode::NOT_FOUND
            }
            CompanyServiceError::Repository(err) => return internal_error("companies", err),
        };
        failure(status, self.to_string())
    }
}
