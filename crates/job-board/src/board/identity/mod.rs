//! Accounts: registration, login and profile maintenance.

pub mod domain;
pub(crate) mod router;
pub mod service;

pub use domain::{
    LoginRequest, ProfileUpdate, RegisterRequest, Role, UnknownRole, User, UserProfile,
    UserSummary, UserView,
};
pub use service::{IdentityError, IdentityService};
