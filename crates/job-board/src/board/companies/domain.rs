use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::ids::{CompanyId, UserId};

/// Company registered by a recruiter. `name` is unique across the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub description: String,
    pub website: String,
    pub location: String,
    pub logo: String,
    #[serde(rename = "userId")]
    pub owner: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn summary(&self) -> CompanySummary {
        CompanySummary {
            id: self.id,
            name: self.name.clone(),
            location: self.location.clone(),
            logo: self.logo.clone(),
        }
    }

    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner == user
    }
}

/// Fields resolved alongside jobs and applications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySummary {
    pub id: CompanyId,
    pub name: String,
    pub location: String,
    pub logo: String,
}

/// Payload for registering or updating a company. Blank fields keep existing values on update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}
