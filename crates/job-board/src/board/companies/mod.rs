//! Company registry owned by recruiters.

pub mod domain;
pub(crate) mod router;
pub mod service;

pub use domain::{Company, CompanyDraft, CompanySummary};
pub use service::{CompanyService, CompanyServiceError};
