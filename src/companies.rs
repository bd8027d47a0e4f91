//! Company lookups.

use serde_json::json;

use crate::graphql_queries::COMPANY_QUERY;
use crate::models::{Company, CompanyData};
use crate::{GraphQLClient, JobBoardError};

/// Fetch a company and the jobs it has posted.
///
/// Returns `None` when the server has no company with this id.
///
/// # Errors
///
/// Returns an error if the API request fails or the response is malformed.
pub async fn load_company(
    client: &GraphQLClient,
    id: &str,
) -> Result<Option<Company>, JobBoardError> {
    let data: CompanyData = client
        .run_query(COMPANY_QUERY, json!({ "id": id }))
        .await?;
    Ok(data.company)
}
