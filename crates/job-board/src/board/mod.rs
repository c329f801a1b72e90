//! Job board domain: accounts, companies, the job catalog and the application lifecycle,
//! exposed as one axum router under `/api/v1`.

pub mod applications;
pub mod auth;
pub(crate) mod body;
pub mod companies;
pub mod identity;
pub mod ids;
pub mod input;
pub mod jobs;
pub(crate) mod response;
pub mod store;

use std::sync::Arc;

use axum::extract::FromRef;
use axum::Router;

use applications::ApplicationService;
use auth::{Authenticator, TokenGate, TokenIssuer};
use companies::CompanyService;
use identity::IdentityService;
use jobs::JobService;
use store::DocumentStore;

/// Services shared by every board handler.
pub struct BoardState<S> {
    pub identity: Arc<IdentityService<S>>,
    pub companies: Arc<CompanyService<S>>,
    pub jobs: Arc<JobService<S>>,
    pub applications: Arc<ApplicationService<S>>,
    pub gate: Arc<dyn Authenticator>,
}

impl<S> BoardState<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>, tokens: Arc<TokenIssuer>) -> Self {
        Self {
            identity: Arc::new(IdentityService::new(store.clone(), tokens.clone())),
            companies: Arc::new(CompanyService::new(store.clone())),
            jobs: Arc::new(JobService::new(store.clone())),
            applications: Arc::new(ApplicationService::new(store.clone())),
            gate: Arc::new(TokenGate::new(tokens, store)),
        }
    }
}

impl<S> Clone for BoardState<S> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            companies: self.companies.clone(),
            jobs: self.jobs.clone(),
            applications: self.applications.clone(),
            gate: self.gate.clone(),
        }
    }
}

impl<S> FromRef<BoardState<S>> for Arc<dyn Authenticator> {
    fn from_ref(state: &BoardState<S>) -> Self {
        state.gate.clone()
    }
}

pub fn board_router<S>(state: BoardState<S>) -> Router
where
    S: DocumentStore,
{
    Router::new()
        .nest("/api/v1/user", identity::router::routes::<S>())
        .nest("/api/v1/company", companies::router::routes::<S>())
        .nest("/api/v1/job", jobs::router::routes::<S>())
        .nest("/api/v1/application", applications::router::routes::<S>())
        .with_state(state)
}
