//! Application lifecycle: students apply to jobs, recruiters review and decide.

pub mod domain;
pub(crate) mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantEntry, Application, ApplicationStatus, AppliedJob, StatusDecision,
    StatusUpdateRequest, SubmittedApplication, UnknownDecision,
};
pub use service::{ApplicationService, ApplicationServiceError};
