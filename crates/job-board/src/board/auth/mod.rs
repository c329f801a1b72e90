//! Credentials, session tokens and the authorization gate.

mod gate;
mod password;
mod token;

pub use gate::{AuthError, Authenticator, Session, TokenGate};
pub use password::{hash_password, verify_password, CredentialError};
pub use token::{Claims, IssuedToken, TokenError, TokenIssuer};
