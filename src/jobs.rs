//! Job operations: listing, fetching one job and creating a job.

use serde_json::json;

use crate::graphql_queries::{CREATE_JOB_MUTATION, JOB_QUERY, JOBS_QUERY};
use crate::models::{CreateJobInput, CreatedJobData, Job, JobData, JobsData};
use crate::{GraphQLClient, JobBoardError};

/// Create a job and return it as stored by the server.
///
/// Sends `variables: {input}`; the server assigns the owning company from
/// the session, so the client should be signed in.
///
/// # Errors
///
/// Returns an error if the API request fails or the response is malformed.
pub async fn create_job(
    client: &GraphQLClient,
    input: &CreateJobInput,
) -> Result<Job, JobBoardError> {
    let data: CreatedJobData = client
        .run_query(CREATE_JOB_MUTATION, json!({ "input": input }))
        .await?;
    Ok(data.job)
}

/// Fetch every job, returning exactly the `jobs` list from the response.
///
/// # Errors
///
/// Returns an error if the API request fails or the response is malformed.
pub async fn load_jobs(client: &GraphQLClient) -> Result<Vec<Job>, JobBoardError> {
    let data: JobsData = client.run_query(JOBS_QUERY, json!({})).await?;
    Ok(data.jobs)
}

/// Fetch a single job by id. Returns `None` when the server has no such job.
///
/// # Errors
///
/// Returns an error if the API request fails or the response is malformed.
pub async fn load_job(client: &GraphQLClient, id: &str) -> Result<Option<Job>, JobBoardError> {
    let data: JobData = client.run_query(JOB_QUERY, json!({ "id": id })).await?;
    Ok(data.job)
}
