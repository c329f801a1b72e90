use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::ids::{CompanyId, JobId, UserId};
use crate::board::input::{Scalar, StringList};

/// Employment type accepted by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Internship,
}

impl JobType {
    pub const fn label(self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Internship => "internship",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job type '{0}'")]
pub struct UnknownJobType(pub String);

impl FromStr for JobType {
    type Err = UnknownJobType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "full-time" => Ok(JobType::FullTime),
            "part-time" => Ok(JobType::PartTime),
            "internship" => Ok(JobType::Internship),
            other => Err(UnknownJobType(other.to_string())),
        }
    }
}

/// Descriptive attributes of a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetails {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub experience: String,
    pub position: String,
    pub job_type: JobType,
    pub location: String,
    pub salary: u64,
}

/// Posting in the catalog. Applications referencing it are indexed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    #[serde(flatten)]
    pub details: JobDetails,
    pub company: CompanyId,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Resolve the job against its company and applicant index for API output.
    pub fn view<C, A>(&self, company: C, applicants: A) -> JobView<C, A> {
        JobView {
            id: self.id,
            details: self.details.clone(),
            company,
            created_by: self.created_by,
            applicants,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Job with its references populated; `C` is the company shape and `A` the applicant shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView<C, A> {
    pub id: JobId,
    #[serde(flatten)]
    pub details: JobDetails,
    pub company: C,
    pub created_by: UserId,
    pub applicants: A,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog filter. An empty search matches every job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSearch {
    pub keyword: Option<String>,
    pub created_by: Option<UserId>,
}

impl JobSearch {
    pub fn keyword(keyword: Option<String>) -> Self {
        let keyword = keyword
            .map(|raw| raw.trim().to_lowercase())
            .filter(|value| !value.is_empty());
        Self {
            keyword,
            created_by: None,
        }
    }

    pub fn created_by(user: UserId) -> Self {
        Self {
            keyword: None,
            created_by: Some(user),
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(creator) = &self.created_by {
            if &job.created_by != creator {
                return false;
            }
        }

        let Some(keyword) = &self.keyword else {
            return true;
        };
        let details = &job.details;
        let contains = |text: &str| text.to_lowercase().contains(keyword.as_str());

        contains(&details.title)
            || contains(&details.description)
            || contains(&details.position)
            || details.requirements.iter().any(|item| contains(item))
    }
}

/// Posting payload. Every field is required; text fields are trimmed.
///
/// `experience`, `position` and `salary` are accepted as JSON numbers or text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Option<StringList>,
    #[serde(default)]
    pub experience: Option<Scalar>,
    #[serde(default)]
    pub position: Option<Scalar>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub salary: Option<Scalar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, requirements: &[&str]) -> Job {
        let now = Utc::now();
        Job {
            id: JobId::generate(),
            details: JobDetails {
                title: title.to_string(),
                description: "Build services".to_string(),
                requirements: requirements.iter().map(|r| r.to_string()).collect(),
                experience: "2-5 years".to_string(),
                position: "Senior".to_string(),
                job_type: JobType::FullTime,
                location: "Remote".to_string(),
                salary: 90_000,
            },
            company: CompanyId::generate(),
            created_by: UserId::generate(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn job_type_tokens_are_strict() {
        assert_eq!("full-time".parse::<JobType>(), Ok(JobType::FullTime));
        assert_eq!(" internship ".parse::<JobType>(), Ok(JobType::Internship));
        assert!("Full-Time".parse::<JobType>().is_err());
        assert!("contract".parse::<JobType>().is_err());
    }

    #[test]
    fn keyword_matches_case_insensitively_across_fields() {
        let posting = job("Backend Engineer", &["Rust", "PostgreSQL"]);
        assert!(JobSearch::keyword(Some("backend".to_string())).matches(&posting));
        assert!(JobSearch::keyword(Some(" rust ".to_string())).matches(&posting));
        assert!(JobSearch::keyword(Some("SERVICES".to_string())).matches(&posting));
        assert!(JobSearch::keyword(Some("senior".to_string())).matches(&posting));
        assert!(!JobSearch::keyword(Some("designer".to_string())).matches(&posting));
    }

    #[test]
    fn blank_keyword_matches_everything() {
        let posting = job("Designer", &[]);
        assert!(JobSearch::keyword(Some("   ".to_string())).matches(&posting));
        assert!(JobSearch::default().matches(&posting));
    }

    #[test]
    fn creator_filter_excludes_other_recruiters() {
        let posting = job("Designer", &[]);
        assert!(JobSearch::created_by(posting.created_by).matches(&posting));
        assert!(!JobSearch::created_by(UserId::generate()).matches(&posting));
    }

    #[test]
    fn serialized_job_flattens_details() {
        let payload = serde_json::to_value(job("Analyst", &["SQL"])).expect("serializes");
        assert_eq!(payload["title"], "Analyst");
        assert_eq!(payload["jobType"], "full-time");
        assert!(payload.get("details").is_none());
        assert_eq!(payload["experience"], "2-5 years");
        assert_eq!(payload["salary"], 90_000);
    }

    #[test]
    fn draft_accepts_text_and_numeric_scalars() {
        let draft: JobDraft = serde_json::from_value(serde_json::json!({
            "experience": "2-5 years",
            "position": 3,
            "salary": "12",
        }))
        .expect("parses");
        assert_eq!(draft.experience, Some(Scalar::text("2-5 years")));
        assert_eq!(draft.position, Some(Scalar::from(3)));
        assert_eq!(draft.salary, Some(Scalar::text("12")));
    }
}
