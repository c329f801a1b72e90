//! Opaque identifiers shared by every board entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raised when a path or body parameter does not parse as an identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier '{raw}'")]
pub struct InvalidId {
    pub raw: String,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = InvalidId;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| InvalidId {
                        raw: raw.to_string(),
                    })
            }
        }
    };
}

entity_id!(
    /// Identifier for a registered account.
    UserId
);
entity_id!(
    /// Identifier for a company in the registry.
    CompanyId
);
entity_id!(
    /// Identifier for a job posting.
    JobId
);
entity_id!(
    /// Identifier for a submitted application.
    ApplicationId
);
