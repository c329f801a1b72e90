//! Storage seam for the board. Services only see these traits; `MemoryStore` is the bundled
//! document store.

mod memory;

pub use memory::MemoryStore;

use crate::board::applications::Application;
use crate::board::companies::Company;
use crate::board::identity::User;
use crate::board::ids::{ApplicationId, CompanyId, JobId, UserId};
use crate::board::jobs::{Job, JobSearch};

/// Names of the unique indexes a store must enforce.
pub mod index {
    pub const USER_EMAIL: &str = "users.email";
    pub const COMPANY_NAME: &str = "companies.name";
    pub const APPLICATION_JOB_APPLICANT: &str = "applications.job_applicant";
}

pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict(index::USER_EMAIL)` when the email is taken.
    fn insert_user(&self, user: User) -> Result<User, RepositoryError>;
    fn update_user(&self, user: User) -> Result<User, RepositoryError>;
    fn user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

pub trait CompanyRepository: Send + Sync {
    /// Fails with `Conflict(index::COMPANY_NAME)` when the name is taken.
    fn insert_company(&self, company: Company) -> Result<Company, RepositoryError>;
    fn update_company(&self, company: Company) -> Result<Company, RepositoryError>;
    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError>;
    fn companies_owned_by(&self, owner: &UserId) -> Result<Vec<Company>, RepositoryError>;
}

pub trait JobRepository: Send + Sync {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError>;
    fn job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError>;
    /// Matching jobs, newest first.
    fn jobs(&self, search: &JobSearch) -> Result<Vec<Job>, RepositoryError>;
}

pub trait ApplicationRepository: Send + Sync {
    /// Stores the application under the unique (job, applicant) index and appends it to the
    /// job's applicant index in the same write. Returns the stored record and the job's
    /// applicant count afterwards.
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<(Application, usize), RepositoryError>;
    fn update_application(&self, application: Application)
        -> Result<Application, RepositoryError>;
    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError>;
    /// Applications for a job in application order.
    fn applications_for_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError>;
    /// Applications submitted by a user, newest first.
    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError>;
}

/// Everything the board services need from a backing store.
pub trait DocumentStore:
    UserRepository + CompanyRepository + JobRepository + ApplicationRepository + 'static
{
}

impl<T> DocumentStore for T where
    T: UserRepository + CompanyRepository + JobRepository + ApplicationRepository + 'static
{
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("unique index {0} already holds this key")]
    Conflict(&'static str),
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
