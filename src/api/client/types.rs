//! Types used by the GraphQL client.

use serde::Deserialize;
use url::Url;

use crate::JobBoardError;

/// A GraphQL document (query or mutation text).
#[derive(Debug, Clone)]
pub struct Query(String);

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque bearer token for the job board API.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("Token(<empty>)")
        } else {
            f.write_str("Token(<redacted>)")
        }
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The job board's GraphQL endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Build an endpoint after checking that `url` is an absolute HTTP(S) URL.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::InvalidEndpoint`] when `url` does not parse
    /// and [`JobBoardError::UnsupportedScheme`] when it is not HTTP(S).
    pub fn parse(url: &str) -> Result<Self, JobBoardError> {
        let parsed = Url::parse(url).map_err(|source| JobBoardError::InvalidEndpoint {
            endpoint: url.into(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(JobBoardError::UnsupportedScheme {
                endpoint: url.into(),
                scheme: parsed.scheme().into(),
            });
        }
        Ok(Self(url.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(DEFAULT_GRAPHQL_URL.to_string())
    }
}

/// Endpoint used when neither configuration nor environment name one.
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:9000/graphql";

#[derive(Debug, Deserialize)]
pub(super) struct GraphQLResponse<T> {
    pub(super) data: Option<T>,
    pub(super) errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GraphQLError {
    pub(super) message: String,
}
