use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::companies::CompanySummary;
use crate::board::identity::UserView;
use crate::board::ids::{ApplicationId, JobId, UserId};
use crate::board::jobs::JobView;

/// Status tracked for every application. `Applied` is the initial state; the other three are
/// set by the recruiter and may be reassigned freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// Recruiter decision tokens accepted by the status update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDecision {
    Accept,
    Reject,
    Pending,
}

impl StatusDecision {
    pub const fn status(self) -> ApplicationStatus {
        match self {
            StatusDecision::Accept => ApplicationStatus::Accepted,
            StatusDecision::Reject => ApplicationStatus::Rejected,
            StatusDecision::Pending => ApplicationStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status decision '{0}'")]
pub struct UnknownDecision(pub String);

impl FromStr for StatusDecision {
    type Err = UnknownDecision;

    /// Tokens are case-sensitive.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "Accept" => Ok(StatusDecision::Accept),
            "Reject" => Ok(StatusDecision::Reject),
            "Pending" => Ok(StatusDecision::Pending),
            other => Err(UnknownDecision(other.to_string())),
        }
    }
}

/// Record linking one applicant to one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job: JobId,
    pub applicant: UserId,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn new(job: JobId, applicant: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: ApplicationId::generate(),
            job,
            applicant,
            status: ApplicationStatus::Applied,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn transition(&mut self, decision: StatusDecision, now: DateTime<Utc>) {
        self.status = decision.status();
        self.updated_at = now;
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplication {
    pub application: Application,
    pub total_applicants: usize,
}

/// An applicant's own application with the job and company resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedJob {
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    pub applicant: UserId,
    pub job: JobView<CompanySummary, Vec<ApplicationId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A job's application with the applicant resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantEntry<U = UserView> {
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    pub job: JobId,
    pub applicant: U,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<U> ApplicantEntry<U> {
    pub fn resolve(application: &Application, applicant: U) -> Self {
        Self {
            id: application.id,
            status: application.status,
            job: application.job,
            applicant,
            created_at: application.created_at,
            updated_at: application.updated_at,
        }
    }
}

/// Body of the status update request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: Option<String>,
}
