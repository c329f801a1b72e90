use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::board::applications::{Application, ApplicationService};
use crate::board::auth::TokenIssuer;
use crate::board::companies::Company;
use crate::board::identity::{Role, User, UserProfile};
use crate::board::ids::{ApplicationId, CompanyId, JobId, UserId};
use crate::board::jobs::{Job, JobDetails, JobSearch, JobType};
use crate::board::store::{
    ApplicationRepository, CompanyRepository, JobRepository, MemoryStore, RepositoryError,
    UserRepository,
};
use crate::board::{board_router, BoardState};

pub(super) struct Board {
    pub store: Arc<MemoryStore>,
    pub tokens: Arc<TokenIssuer>,
    pub recruiter: User,
    pub company: Company,
    pub job: Job,
}

impl Board {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let tokens = Arc::new(TokenIssuer::new("applications-secret", Duration::hours(1)));
        let recruiter = user(&store, "Rita Recruiter", Role::Recruiter);
        let company = company(&store, &recruiter, "Acme");
        let job = job(&store, &company, &recruiter, "Backend Engineer");
        Self {
            store,
            tokens,
            recruiter,
            company,
            job,
        }
    }

    pub fn service(&self) -> ApplicationService<MemoryStore> {
        ApplicationService::new(self.store.clone())
    }

    pub fn student(&self, fullname: &str) -> User {
        user(&self.store, fullname, Role::Student)
    }

    pub fn recruiter(&self, fullname: &str) -> User {
        user(&self.store, fullname, Role::Recruiter)
    }

    pub fn router(&self) -> Router {
        board_router(BoardState::new(self.store.clone(), self.tokens.clone()))
    }

    pub fn token(&self, user: &User) -> String {
        self.tokens.issue(user).expect("token issued").token
    }
}

pub(super) fn user(store: &MemoryStore, fullname: &str, role: Role) -> User {
    let now = Utc::now();
    let id = UserId::generate();
    store
        .insert_user(User {
            id,
            fullname: fullname.to_string(),
            email: format!("{id}@example.com"),
            password_hash: "hash".to_string(),
            phone_number: "5550100".to_string(),
            role,
            profile: UserProfile::default(),
            created_at: now,
            updated_at: now,
        })
        .expect("user stored")
}

pub(super) fn company(store: &MemoryStore, owner: &User, name: &str) -> Company {
    let now = Utc::now();
    store
        .insert_company(Company {
            id: CompanyId::generate(),
            name: name.to_string(),
            description: "Builds things".to_string(),
            website: "https://example.com".to_string(),
            location: "Berlin".to_string(),
            logo: "https://cdn.example.com/acme.png".to_string(),
            owner: owner.id,
            created_at: now,
            updated_at: now,
        })
        .expect("company stored")
}

pub(super) fn job(store: &MemoryStore, company: &Company, creator: &User, title: &str) -> Job {
    let now = Utc::now();
    store
        .insert_job(Job {
            id: JobId::generate(),
            details: JobDetails {
                title: title.to_string(),
                description: "Own the services".to_string(),
                requirements: vec!["Rust".to_string()],
                experience: "2 years".to_string(),
                position: "Backend".to_string(),
                job_type: JobType::FullTime,
                location: "Berlin".to_string(),
                salary: 85_000,
            },
            company: company.id,
            created_by: creator.id,
            created_at: now,
            updated_at: now,
        })
        .expect("job stored")
}

pub(super) fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                serde_json::to_vec(&body).expect("serialize body"),
            ))
            .expect("request builds"),
        None => builder
            .body(Body::empty())
            .expect("request builds"),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

/// Store whose every call fails, for exercising the 500 path.
pub(super) struct UnavailableStore;

fn unavailable<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("store offline".to_string()))
}

impl UserRepository for UnavailableStore {
    fn insert_user(&self, _user: User) -> Result<User, RepositoryError> {
        unavailable()
    }

    fn update_user(&self, _user: User) -> Result<User, RepositoryError> {
        unavailable()
    }

    fn user(&self, _id: &UserId) -> Result<Option<User>, RepositoryError> {
        unavailable()
    }

    fn user_by_email(&self, _email: &str) -> Result<Option<User>, RepositoryError> {
        unavailable()
    }
}

impl CompanyRepository for UnavailableStore {
    fn insert_company(&self, _company: Company) -> Result<Company, RepositoryError> {
        unavailable()
    }

    fn update_company(&self, _company: Company) -> Result<Company, RepositoryError> {
        unavailable()
    }

    fn company(&self, _id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        unavailable()
    }

    fn companies_owned_by(&self, _owner: &UserId) -> Result<Vec<Company>, RepositoryError> {
        unavailable()
    }
}

impl JobRepository for UnavailableStore {
    fn insert_job(&self, _job: Job) -> Result<Job, RepositoryError> {
        unavailable()
    }

    fn job(&self, _id: &JobId) -> Result<Option<Job>, RepositoryError> {
        unavailable()
    }

    fn jobs(&self, _search: &JobSearch) -> Result<Vec<Job>, RepositoryError> {
        unavailable()
    }
}

impl ApplicationRepository for UnavailableStore {
    fn insert_application(
        &self,
        _application: Application,
    ) -> Result<(Application, usize), RepositoryError> {
        unavailable()
    }

    fn update_application(
        &self,
        _application: Application,
    ) -> Result<Application, RepositoryError> {
        unavailable()
    }

    fn application(&self, _id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        unavailable()
    }

    fn applications_for_job(&self, _job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        unavailable()
    }

    fn applications_by_applicant(
        &self,
        _applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        unavailable()
    }
}

/// Store whose per-job listing always reads empty, so submissions reach the
/// (job, applicant) index in `insert_application` without a prior duplicate check.
pub(super) struct StaleListingStore(pub Arc<MemoryStore>);

impl UserRepository for StaleListingStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        self.0.insert_user(user)
    }

    fn update_user(&self, user: User) -> Result<User, RepositoryError> {
        self.0.update_user(user)
    }

    fn user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        self.0.user(id)
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.0.user_by_email(email)
    }
}

impl CompanyRepository for StaleListingStore {
    fn insert_company(&self, company: Company) -> Result<Company, RepositoryError> {
        self.0.insert_company(company)
    }

    fn update_company(&self, company: Company) -> Result<Company, RepositoryError> {
        self.0.update_company(company)
    }

    fn company(&self, id: &CompanyId) -> Result<Option<Company>, RepositoryError> {
        self.0.company(id)
    }

    fn companies_owned_by(&self, owner: &UserId) -> Result<Vec<Company>, RepositoryError> {
        self.0.companies_owned_by(owner)
    }
}

impl JobRepository for StaleListingStore {
    fn insert_job(&self, job: Job) -> Result<Job, RepositoryError> {
        self.0.insert_job(job)
    }

    fn job(&self, id: &JobId) -> Result<Option<Job>, RepositoryError> {
        self.0.job(id)
    }

    fn jobs(&self, search: &JobSearch) -> Result<Vec<Job>, RepositoryError> {
        self.0.jobs(search)
    }
}

impl ApplicationRepository for StaleListingStore {
    fn insert_application(
        &self,
        application: Application,
    ) -> Result<(Application, usize), RepositoryError> {
        self.0.insert_application(application)
    }

    fn update_application(
        &self,
        application: Application,
    ) -> Result<Application, RepositoryError> {
        self.0.update_application(application)
    }

    fn application(&self, id: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        self.0.application(id)
    }

    fn applications_for_job(&self, _job: &JobId) -> Result<Vec<Application>, RepositoryError> {
        Ok(Vec::new())
    }

    fn applications_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, RepositoryError> {
        self.0.applications_by_applicant(applicant)
    }
}
