//! Data structures for job board GraphQL responses and inputs.

use serde::{Deserialize, Serialize};

/// A job posting.
///
/// List queries select only `id`, `title` and `company`, so `description`
/// is absent there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Job {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub company: Option<CompanyRef>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The company fields embedded in a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompanyRef {
    pub id: String,
    pub name: String,
}

/// A company with the jobs it has posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Company {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

/// The job fields listed under a company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
}

/// Input for the `createJob` mutation.
///
/// The owning company is taken from the signed-in user on the server side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobData {
    pub(crate) job: Option<Job>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedJobData {
    pub(crate) job: Job,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsData {
    pub(crate) jobs: Vec<Job>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanyData {
    pub(crate) company: Option<Company>,
}
