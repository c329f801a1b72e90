use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use super::domain::{Job, JobDetails, JobDraft, JobSearch, JobType, JobView};
use crate::board::applications::ApplicantEntry;
use crate::board::companies::{Company, CompanySummary};
use crate::board::identity::{Role, User, UserSummary};
use crate::board::ids::{ApplicationId, CompanyId, JobId};
use crate::board::input::{present, present_scalar};
use crate::board::response::{failure, internal_error};
use crate::board::store::{DocumentStore, RepositoryError};

/// Job resolved with its company summary and applicant index.
pub type JobListing = JobView<CompanySummary, Vec<ApplicationId>>;

/// Job resolved with its company summary and each application's applicant.
pub type JobDetail = JobView<CompanySummary, Vec<ApplicantEntry<UserSummary>>>;

/// Recruiter's own posting with the full company record.
pub type AdminJob = JobView<Company, Vec<ApplicationId>>;

pub struct JobService<S> {
    store: Arc<S>,
}

impl<S> JobService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, recruiter: &User, draft: JobDraft) -> Result<Job, JobServiceError> {
        if !recruiter.is(Role::Recruiter) {
            return Err(JobServiceError::RecruitersOnly);
        }

        let requirements = draft
            .requirements
            .map(|list| list.into_items())
            .filter(|items| !items.is_empty());
        let (
            Some(title),
            Some(description),
            Some(requirements),
            Some(experience),
            Some(position),
            Some(job_type),
            Some(location),
            Some(company),
            Some(salary),
        ) = (
            present(draft.title),
            present(draft.description),
            requirements,
            present_scalar(draft.experience),
            present_scalar(draft.position),
            present(draft.job_type),
            present(draft.location),
            present(draft.company),
            present_scalar(draft.salary),
        )
        else {
            return Err(JobServiceError::MissingFields);
        };

        let company_id: CompanyId = company
            .parse()
            .map_err(|_| JobServiceError::InvalidCompanyId)?;
        let job_type: JobType = job_type
            .parse()
            .map_err(|_| JobServiceError::InvalidJobType)?;
        let salary: u64 = salary
            .parse()
            .map_err(|_| JobServiceError::InvalidSalary)?;

        let company = self
            .store
            .company(&company_id)?
            .ok_or(JobServiceError::CompanyNotFound)?;
        if !company.is_owned_by(&recruiter.id) {
            return Err(JobServiceError::NotCompanyOwner);
        }

        let now = Utc::now();
        let job = Job {
            id: JobId::generate(),
            details: JobDetails {
                title,
                description,
                requirements,
                experience,
                position,
                job_type,
                location,
                salary,
            },
            company: company.id,
            created_by: recruiter.id,
            created_at: now,
            updated_at: now,
        };

        let stored = self.store.insert_job(job)?;
        tracing::info!(job_id = %stored.id, company_id = %stored.company, "job posted");
        Ok(stored)
    }

    /// Public catalog search, newest first.
    pub fn search(&self, keyword: Option<String>) -> Result<Vec<JobListing>, JobServiceError> {
        let jobs = self.store.jobs(&JobSearch::keyword(keyword))?;
        if jobs.is_empty() {
            return Err(JobServiceError::NoJobs);
        }

        jobs.iter()
            .map(|job| -> Result<JobListing, JobServiceError> {
                let company = self.company_of(job)?.summary();
                Ok(job.view(company, self.applicant_index(job)?))
            })
            .collect()
    }

    pub fn detail(&self, id: &JobId) -> Result<JobDetail, JobServiceError> {
        let job = self.store.job(id)?.ok_or(JobServiceError::JobNotFound)?;
        let company = self.company_of(&job)?.summary();

        let applicants = self
            .store
            .applications_for_job(&job.id)?
            .iter()
            .map(|application| -> Result<ApplicantEntry<UserSummary>, JobServiceError> {
                let applicant = self.store.user(&application.applicant)?.ok_or_else(|| {
                    JobServiceError::DanglingReference(format!(
                        "application {} references missing user {}",
                        application.id, application.applicant
                    ))
                })?;
                Ok(ApplicantEntry::resolve(application, applicant.summary()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(job.view(company, applicants))
    }

    /// Postings created by the caller, newest first.
    pub fn posted_by(&self, recruiter: &User) -> Result<Vec<AdminJob>, JobServiceError> {
        let jobs = self.store.jobs(&JobSearch::created_by(recruiter.id))?;
        if jobs.is_empty() {
            return Err(JobServiceError::NoJobs);
        }

        jobs.iter()
            .map(|job| -> Result<AdminJob, JobServiceError> {
                Ok(job.view(self.company_of(job)?, self.applicant_index(job)?))
            })
            .collect()
    }

    fn company_of(&self, job: &Job) -> Result<Company, JobServiceError> {
        self.store.company(&job.company)?.ok_or_else(|| {
            JobServiceError::DanglingReference(format!(
                "job {} references missing company {}",
                job.id, job.company
            ))
        })
    }

    fn applicant_index(&self, job: &Job) -> Result<Vec<ApplicationId>, JobServiceError> {
        Ok(self
            .store
            .applications_for_job(&job.id)?
            .into_iter()
            .map(|application| application.id)
            .collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid company ID")]
    InvalidCompanyId,
    #[error("Invalid job ID")]
    InvalidJobId,
    #[error("Invalid job type")]
    InvalidJobType,
    #[error("Salary must be a number")]
    InvalidSalary,
    #[error("Only recruiters can post jobs")]
    RecruitersOnly,
    #[error("You do not own this company")]
    NotCompanyOwner,
    #[error("Company not found")]
    CompanyNotFound,
    #[error("Job not found")]
    JobNotFound,
    #[error("No jobs found")]
    NoJobs,
    #[error("dangling reference: {0}")]
    DanglingReference(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for JobServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            JobServiceError::MissingFields
            | JobServiceError::InvalidCompanyId
            | JobServiceError::InvalidJobId
            | JobServiceError::InvalidJobType
            | JobServiceError::InvalidSalary => StatusCode::BAD_REQUEST,
            JobServiceError::RecruitersOnly | JobServiceError::NotCompanyOwner => {
                StatusCode::FORBIDDEN
            }
            JobServiceError::CompanyNotFound
            | JobServiceError::JobNotFound
            | JobServiceError::NoJobs => StatusCode::NOT_FOUND,
            JobServiceError::DanglingReference(_) | JobServiceError::Repository(_) => {
                return internal_error("jobs", &self)
            }
        };
        failure(status, self.to_string())
    }
}
