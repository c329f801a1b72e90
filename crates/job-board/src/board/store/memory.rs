use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::{
    index, ApplicationRepository, CompanyRepository, JobRepository, RepositoryError,
    UserRepository,
};
use crate::board::applications::Application;
use crate::board::companies::Company;
use crate::board::identity::User;
use crate::board::ids::{ApplicationId, CompanyId, JobId, UserId};
use crate::board::jobs::{Job, JobSearch};

/// In-process document store. All collections and indexes live behind one lock so
/// multi-document writes are atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    sequence: u64,
    users: HashMap<UserId, Stored<User>>,
    user_emails: HashMap<String, UserId>,
    companies: HashMap<CompanyId, Stored<Company>>,
    company_names: HashMap<String, CompanyId>,
    jobs: HashMap<JobId, Stored<Job>>,
    job_applicants: HashMap<JobId, Vec<ApplicationId>>,
    applications: HashMap<ApplicationId, Stored<Application>>,
    application_pairs: HashMap<(JobId, UserId), ApplicationId>,
}

/// Record plus its insertion sequence, used to break creation-time ties.
#[derive(Debug, Clone)]
struct Stored<T> {
    sequence: u64,
    record: T,
}

impl StoreState {
    fn stamp<T>(&mut self, record: T) -> Stored<T> {
        self.sequence += 1;
        Stored {
            sequence: self.sequence,
            record,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

fn newest_first<'a, T, F>(records: impl Iterator<Item = &'a Stored<T>>, created_at: F) -> Vec<T>
where
    T: Clone + 'a,
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut selected: Vec<&Stored<T>> = records.collect();
    selected.sort_by(|a, b| {
        created_at(&b.record)
            .cmp(&created_at(&a.record))
            .then(b.sequence.cmp(&a.sequence))
    });
    selected
        .into_iter()
        .map(|stored| stored.record.clone())
        .collect()
}

impl UserRepository for MemoryStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;
        if state.user_emails.contains_key(&user.email) {
            return Err(RepositoryError::Conflict(index::USER_EMAIL));
        }
        state.user_emails.insert(user.email.clone(), user.id);
        let stored = state.stamp(user.clone());
        state.users.insert(user.id, stored);
        Ok(user)
    }

    fn update_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut state = self.lock()?;
        let previous_email = match state.users.get(&user.id) {
            Some(stored) => stored.record.email.clone(),
            None => return Err(RepositoryError::NotFound),
        };

        if previous_email != user.email {
            if state.user_emails.contains_key(&user.email) {
                return Err(RepositoryError::Conflict(index::USER_EMAIL));
            }
            state.user_emails.remove(&previous_email);
            state.user_emails.insert(user.email.clone(), user.id);
        }

        if let Some(stored) = state.users.get_mut(&user.id) {
            stored.record = user.clone();
        }
        Ok(user)
    }

    fn user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.users.get(id).map(|stored| stored.record.clone()))
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.lock()?;
        Ok(state
            .user_emails
            .get(email)
            .and_then(|id| state.users.get(id))
            .map(|stored| stored.record.clone()))
    }
}

impl CompanyRepository for MemoryStore {
    fn insert_company(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut state = self.lock()?;
        if state.company_names.contains_key(&company.name) {
            return Err(RepositoryError::Conflict(index::COMPANY_NAME));
        }
        state.company_names.insert(company.name.clone(), company.id);
        let stored = state.stamp(company.clone());
        state.companies.insert(company.id, stored);
        Ok(company)
    }

    fn update_company(&self, company: Company) -> Result<Company, RepositoryError> {
        let mut state = self.lock()?;
        let previous_name = match state.companies.get(&company.id) {
            Some(stored) => stored.record.name.clone(),
            None => return Err(RepositoryError::NotFound),
        };

        if previous_name != company.name {
            if state.company_names.contains_key(&company.name) {
                return Err(RepositoryError::Conflict(index::COMPANY_NAME));
            }
            state.company_names.remove(&previous_name);
            state.company_names.insert(company.name.clone(), company.id);
        }

        if let Some(stored) = state.companies.get_mut(&company.id) {
            stored.record = company.clone();
        }
        Ok(company)
    }

    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.companies.get(id).map(|stored| stored.record.clone()))
    }

    fn companies_owned_by(&self, owner: &UserId) -> Result<Vec<Company>, RepositoryError> {
        let state = self.lock()?;
        let mut owned: Vec<&Stored<Company>> = state
            .companies
            .values()
            .filter(|stored| &stored.record.owner == owner)
            .collect();
        owned.sort_by_key(|stored| stored.sequence);
        Ok(owned
            .into_iter()
            .map(|stored| stored.record.clone())
            .collect())
    }
}

impl JobRepository for MemoryStore {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let mut state = self.lock()?;
        if !state.companies.contains_key(&job.company) {
            return Err(RepositoryError::NotFound);
        }
        let stored = state.stamp(job.clone());
        state.jobs.insert(job.id, stored);
        state.job_applicants.entry(job.id).or_default();
        Ok(job)
    }

    fn job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.jobs.get(id).map(|stored| stored.record.clone()))
    }

    fn jobs(&self, search: &JobSearch) -> Result<Vec<Job>, RepositoryError> {
        let state = self.lock()?;
        let matching = state
            .jobs
            .values()
            .filter(|stored| search.matches(&stored.record));
        Ok(newest_first(matching, |job| job.created_at))
    }
}

impl ApplicationRepository for MemoryStore {
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<(Application, usize), RepositoryError> {
        let mut state = self.lock()?;
        if !state.jobs.contains_key(&application.job) {
            return Err(RepositoryError::NotFound);
        }

        let pair = (application.job, application.applicant);
        if state.application_pairs.contains_key(&pair) {
            return Err(RepositoryError::Conflict(index::APPLICATION_JOB_APPLICANT));
        }

        state.application_pairs.insert(pair, application.id);
        let stored = state.stamp(application.clone());
        state.applications.insert(application.id, stored);

        let applicants = state.job_applicants.entry(application.job).or_default();
        applicants.push(application.id);
        let total = applicants.len();

        Ok((application, total))
    }

    fn update_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        let mut state = self.lock()?;
        let stored = state
            .applications
            .get_mut(&application.id)
            .ok_or(RepositoryError::NotFound)?;

        // job and applicant are immutable; only status and timestamps move.
        stored.record.status = application.status;
        stored.record.updated_at = application.updated_at;
        Ok(stored.record.clone())
    }

    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        let state = self.lock()?;
        Ok(state.applications.get(id).map(|stored| stored.record.clone()))
    }

    fn applications_for_job(&self, job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        let state = self.lock()?;
        let Some(ids) = state.job_applicants.get(job) else {
            return Ok(Vec::new());
        };

        Ok(ids
            .iter()
            .filter_map(|id| state.applications.get(id))
            .map(|stored| stored.record.clone())
            .collect())
    }

    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        let state = self.lock()?;
        let submitted = state
            .applications
            .values()
            .filter(|stored| &stored.record.applicant == applicant);
        Ok(newest_first(submitted, |application| application.created_at))
    }
}
