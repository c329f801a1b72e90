use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;

use super::domain::{Application, ApplicantEntry, AppliedJob, StatusDecision, SubmittedApplication};
use crate::board::companies::Company;
use crate::board::identity::{Role, User};
use crate::board::ids::{ApplicationId, JobId};
use crate::board::jobs::Job;
use crate::board::response::{failure, internal_error};
use crate::board::store::{index, DocumentStore, RepositoryError};

/// Application lifecycle: submission by students, review by the recruiter who owns the job.
pub struct ApplicationService<S> {
    store: Arc<S>,
}

impl<S> ApplicationService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn submit(
        &self,
        applicant: &User,
        job_id: &JobId,
    ) -> Result<SubmittedApplication, ApplicationServiceError> {
        if !applicant.is(Role::Student) {
            return Err(ApplicationServiceError::StudentsOnly);
        }

        let job = self
            .store
            .job(job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;

        let already_applied = self
            .store
            .applications_for_job(&job.id)?
            .iter()
            .any(|existing| existing.applicant == applicant.id);
        if already_applied {
            return Err(ApplicationServiceError::AlreadyApplied);
        }

        let application = Application::new(job.id, applicant.id, Utc::now());
        let (application, total_applicants) = self
            .store
            .insert_application(application)
            .map_err(|err| match err {
                RepositoryError::Conflict(index::APPLICATION_JOB_APPLICANT) => {
                    ApplicationServiceError::AlreadyApplied
                }
                RepositoryError::NotFound => ApplicationServiceError::JobNotFound,
                other => ApplicationServiceError::Repository(other),
            })?;

        tracing::info!(
            application_id = %application.id,
            job_id = %application.job,
            applicant_id = %application.applicant,
            total_applicants,
            "application submitted"
        );
        Ok(SubmittedApplication {
            application,
            total_applicants,
        })
    }

    /// The caller's own applications, newest first.
    pub fn applied_jobs(
        &self,
        applicant: &User,
    ) -> Result<Vec<AppliedJob>, ApplicationServiceError> {
        let applications = self.store.applications_by_applicant(&applicant.id)?;
        if applications.is_empty() {
            return Err(ApplicationServiceError::NoApplications);
        }

        applications
            .iter()
            .map(|application| -> Result<AppliedJob, ApplicationServiceError> {
                let job = self.job_of(application)?;
                let company = self.company_of(&job)?.summary();
                let applicants = self
                    .store
                    .applications_for_job(&job.id)?
                    .into_iter()
                    .map(|entry| entry.id)
                    .collect();
                Ok(AppliedJob {
                    id: application.id,
                    status: application.status,
                    applicant: application.applicant,
                    job: job.view(company, applicants),
                    created_at: application.created_at,
                    updated_at: application.updated_at,
                })
            })
            .collect()
    }

    /// Applications for a job the caller administers, in application order.
    pub fn applicants(
        &self,
        reviewer: &User,
        job_id: &JobId,
    ) -> Result<Vec<ApplicantEntry>, ApplicationServiceError> {
        let job = self
            .store
            .job(job_id)?
            .ok_or(ApplicationServiceError::JobNotFound)?;
        self.ensure_reviewer(reviewer, &job)?;

        let applications = self.store.applications_for_job(&job.id)?;
        if applications.is_empty() {
            return Err(ApplicationServiceError::NoApplicants);
        }

        applications
            .iter()
            .map(|application| -> Result<ApplicantEntry, ApplicationServiceError> {
                let applicant = self.store.user(&application.applicant)?.ok_or_else(|| {
                    ApplicationServiceError::DanglingReference(format!(
                        "application {} references missing user {}",
                        application.id, application.applicant
                    ))
                })?;
                Ok(ApplicantEntry::resolve(application, applicant.view()))
            })
            .collect()
    }

    pub fn update_status(
        &self,
        reviewer: &User,
        id: &ApplicationId,
        decision: StatusDecision,
    ) -> Result<Application, ApplicationServiceError> {
        let mut application = self
            .store
            .application(id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)?;
        let job = self.job_of(&application)?;
        self.ensure_reviewer(reviewer, &job)?;

        let previous = application.status;
        application.transition(decision, Utc::now());
        let updated = self.store.update_application(application)?;

        tracing::info!(
            application_id = %updated.id,
            reviewer_id = %reviewer.id,
            from = previous.label(),
            to = updated.status.label(),
            "application status updated"
        );
        Ok(updated)
    }

    /// The job's creator or the owner of the job's company may review its applications.
    fn ensure_reviewer(&self, reviewer: &User, job: &Job) -> Result<(), ApplicationServiceError> {
        if job.created_by == reviewer.id || self.company_of(job)?.is_owned_by(&reviewer.id) {
            return Ok(());
        }
        tracing::warn!(job_id = %job.id, reviewer_id = %reviewer.id, "review denied");
        Err(ApplicationServiceError::NotJobOwner)
    }

    fn job_of(&self, application: &Application) -> Result<Job, ApplicationServiceError> {
        self.store.job(&application.job)?.ok_or_else(|| {
            ApplicationServiceError::DanglingReference(format!(
                "application {} references missing job {}",
                application.id, application.job
            ))
        })
    }

    fn company_of(&self, job: &Job) -> Result<Company, ApplicationServiceError> {
        self.store.company(&job.company)?.ok_or_else(|| {
            ApplicationServiceError::DanglingReference(format!(
                "job {} references missing company {}",
                job.id, job.company
            ))
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("Invalid job ID")]
    InvalidJobId,
    #[error("Invalid application ID")]
    InvalidApplicationId,
    #[error("Invalid or missing status")]
    InvalidStatus,
    #[error("You have already applied for this job.")]
    AlreadyApplied,
    #[error("Only students can apply for jobs")]
    StudentsOnly,
    #[error("You are not allowed to review applications for this job")]
    NotJobOwner,
    #[error("Job not found")]
    JobNotFound,
    #[error("Application not found")]
    ApplicationNotFound,
    #[error("No applications found")]
    NoApplications,
    #[error("No applicants found for this job")]
    NoApplicants,
    #[error("dangling reference: {0}")]
    DanglingReference(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for ApplicationServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApplicationServiceError::InvalidJobId
            | ApplicationServiceError::InvalidApplicationId
            | ApplicationServiceError::InvalidStatus
            | ApplicationServiceError::AlreadyApplied => StatusCode::BAD_REQUEST,
            ApplicationServiceError::StudentsOnly | ApplicationServiceError::NotJobOwner => {
                StatusCode::FORBIDDEN
            }
            ApplicationServiceError::JobNotFound
            | ApplicationServiceError::ApplicationNotFound
            | ApplicationServiceError::NoApplications
            | ApplicationServiceError::NoApplicants => StatusCode::NOT_FOUND,
            ApplicationServiceError::DanglingReference(_)
            | ApplicationServiceError::Repository(_) => {
                return internal_error("applications", &self)
            }
        };
        failure(status, self.to_string())
    }
}
