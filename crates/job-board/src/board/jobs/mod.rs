//! Job catalog: postings created by recruiters and read by everyone.

pub mod domain;
pub(crate) mod router;
pub mod service;

pub use domain::{Job, JobDetails, JobDraft, JobSearch, JobType, JobView, UnknownJobType};
pub use service::{AdminJob, JobDetail, JobListing, JobService, JobServiceError};
