//! GraphQL client implementation and request orchestration.

mod helpers;
mod http;
mod transcript;
mod types;

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::JobBoardError;
use crate::auth::Session;
use crate::environment;

use self::helpers::{
    BODY_SNIPPET_LEN, VALUE_SNIPPET_LEN, build_headers, build_payload, handle_graphql_errors,
    operation_label, payload_snippet, snippet,
};
use self::http::HttpResponse;
use self::types::GraphQLResponse;
use super::options::HttpOptions;

pub use self::types::{DEFAULT_GRAPHQL_URL, Endpoint, Query, Token};

/// Environment variable overriding the default endpoint.
pub const ENDPOINT_ENV: &str = "JOBBOARD_GRAPHQL_URL";


/// Pick the endpoint from configuration, then `JOBBOARD_GRAPHQL_URL`, then
/// [`DEFAULT_GRAPHQL_URL`]. Empty values are ignored.
///
/// # Errors
///
/// Returns [`JobBoardError::InvalidEndpoint`] or
/// [`JobBoardError::UnsupportedScheme`] when the chosen value is not an
/// HTTP(S) URL.
pub fn resolve_endpoint(configured: Option<&str>) -> Result<Endpoint, JobBoardError> {
    let chosen = configured
        .filter(|url| !url.is_empty())
        .map(str::to_owned)
        .or_else(|| environment::non_empty_var(ENDPOINT_ENV));
    match chosen {
        Some(url) => Endpoint::parse(&url),
        None => Ok(Endpoint::default()),
    }
}

/// Client for the job board GraphQL endpoint.
///
/// Each call performs exactly one HTTP POST. The session is consulted per
/// call, so signing in or out between calls changes the next request's
/// `authorization` header.
pub struct GraphQLClient {
    client: reqwest::Client,
    session: Arc<dyn Session>,
    endpoint: Endpoint,
    transcript: Option<Mutex<std::io::BufWriter<std::fs::File>>>,
}

impl GraphQLClient {
    /// Create a client for the endpoint named by `JOBBOARD_GRAPHQL_URL`, or
    /// the default local endpoint when unset.
    ///
    /// The optional `transcript` path records each request and response
    /// for troubleshooting failed queries.
    ///
    /// # Errors
    ///
    /// Returns a [`JobBoardError`] if the environment names an invalid URL,
    /// the transcript file cannot be created or the HTTP client cannot be
    /// built.
    pub fn new(
        session: Arc<dyn Session>,
        transcript: Option<PathBuf>,
    ) -> Result<Self, JobBoardError> {
        let endpoint = resolve_endpoint(None)?;
        Self::with_options(session, endpoint, transcript, HttpOptions::default())
    }

    /// Create a client targeting a specific endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`JobBoardError`] if the transcript file cannot be created
    /// or the HTTP client cannot be built.
    pub fn with_endpoint(
        session: Arc<dyn Session>,
        endpoint: impl Into<Endpoint>,
        transcript: Option<PathBuf>,
    ) -> Result<Self, JobBoardError> {
        Self::with_options(session, endpoint, transcript, HttpOptions::default())
    }

    /// Create a client targeting a specific endpoint with custom timeouts.
    ///
    /// # Errors
    ///
    /// Returns a [`JobBoardError`] if the transcript file cannot be created
    /// or the HTTP client cannot be built.
    pub fn with_options(
        session: Arc<dyn Session>,
        endpoint: impl Into<Endpoint>,
        transcript: Option<PathBuf>,
        options: HttpOptions,
    ) -> Result<Self, JobBoardError> {
        let transcript = transcript
            .map(|p| {
                std::fs::File::create(p).map(|file| Mutex::new(std::io::BufWriter::new(file)))
            })
            .transpose()?;
        let client = reqwest::Client::builder()
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .build()
            .map_err(|e| JobBoardError::RequestContext {
                context: "building HTTP client".into(),
                source: e.into(),
            })?;
        Ok(Self {
            client,
            session,
            endpoint: endpoint.into(),
            transcript,
        })
    }

    /// The endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Whether the next request will carry an `authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Send one HTTP request and return the status code and body.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::RequestContext`] if the request cannot be
    /// sent or the body cannot be read.
    async fn execute_single_request(
        &self,
        payload: &Value,
        operation: &str,
    ) -> Result<HttpResponse, JobBoardError> {
        let headers = build_headers(self.session.as_ref())?;
        let snip = payload_snippet(payload);
        let make_ctx = |status: Option<u16>| {
            let base = format!("operation {operation}; {snip}");
            match status {
                Some(s) => format!("{base}; status {s}"),
                None => base,
            }
            .into_boxed_str()
        };

        debug!(
            "sending {operation} to {} (authenticated: {})",
            self.endpoint.as_str(),
            headers.contains_key(reqwest::header::AUTHORIZATION)
        );
        let response = self
            .client
            .post(self.endpoint.as_str())
            .headers(headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| JobBoardError::RequestContext {
                context: make_ctx(None),
                source: e.into(),
            })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| JobBoardError::RequestContext {
                context: make_ctx(Some(status)),
                source: e.into(),
            })?;
        let resp = HttpResponse { status, body };
        debug!("{operation} answered with status {status}");
        self.log_transcript(payload, operation, &resp);
        Ok(resp)
    }

    /// Interpret a response body as a GraphQL envelope and extract `data`.
    ///
    /// A non-empty `errors` list wins over everything else, including the
    /// HTTP status and any `data` sent alongside it.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::GraphQl`] for envelope errors and a
    /// transport-kind error for unusable bodies or statuses.
    fn process_graphql_response<T>(resp: &HttpResponse, operation: &str) -> Result<T, JobBoardError>
    where
        T: DeserializeOwned,
    {
        let body = &resp.body;
        let status = resp.status;
        let envelope: GraphQLResponse<Value> = match serde_json::from_str(body) {
            Ok(envelope) => envelope,
            Err(_) if !resp.is_success() => {
                return Err(JobBoardError::HttpStatus {
                    status,
                    snippet: snippet(body, BODY_SNIPPET_LEN).into(),
                });
            }
            Err(e) => {
                return Err(JobBoardError::BadResponseSerde {
                    status,
                    message: e.to_string().into(),
                    snippet: snippet(body, BODY_SNIPPET_LEN).into(),
                });
            }
        };
        if let Some(errs) = envelope.errors.filter(|errs| !errs.is_empty()) {
            return Err(handle_graphql_errors(errs));
        }
        if !resp.is_success() {
            return Err(JobBoardError::HttpStatus {
                status,
                snippet: snippet(body, BODY_SNIPPET_LEN).into(),
            });
        }
        let Some(value) = envelope.data else {
            return Err(JobBoardError::EmptyResponse {
                status,
                operation: operation.into(),
                snippet: snippet(body, BODY_SNIPPET_LEN).into(),
            });
        };
        serde_path_to_error::deserialize::<_, T>(value.clone()).map_err(|e| {
            let snippet = match serde_json::to_string_pretty(&value) {
                Ok(json) => snippet(&json, VALUE_SNIPPET_LEN),
                Err(_) => "<failed to serialise error snippet>".to_string(),
            };
            let path = e.path().to_string();
            let inner = e.into_inner();
            JobBoardError::BadResponseSerde {
                status,
                message: format!("{inner} at {path}").into(),
                snippet: snippet.into(),
            }
        })
    }

    /// Execute a GraphQL document and deserialise its `data` into `T`.
    ///
    /// `variables` must serialise to a JSON object; `()` is sent as `{}`.
    ///
    /// # Errors
    ///
    /// Returns [`JobBoardError::GraphQl`] when the server reports errors, a
    /// transport-kind error when the exchange fails, or
    /// [`JobBoardError::InvalidVariables`] before sending anything.
    pub async fn run_query<V, T>(
        &self,
        query: impl Into<Query>,
        variables: V,
    ) -> Result<T, JobBoardError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let query = query.into();
        let operation = operation_label(&query);
        let payload = build_payload(&query, variables)?;
        let resp = self.execute_single_request(&payload, &operation).await?;
        Self::process_graphql_response::<T>(&resp, &operation)
    }

    /// Execute a GraphQL document and return the raw `data` object.
    ///
    /// # Examples
    /// ```no_run
    /// use jobboard::api::GraphQLClient;
    /// use serde_json::Map;
    /// # async fn run(client: GraphQLClient) -> Result<(), jobboard::JobBoardError> {
    /// let data = client.request("query { jobs { id } }", Map::new()).await?;
    /// assert!(data.contains_key("jobs"));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// See [`GraphQLClient::run_query`].
    pub async fn request(
        &self,
        query: impl Into<Query>,
        variables: Map<String, Value>,
    ) -> Result<Map<String, Value>, JobBoardError> {
        self.run_query(query, variables).await
    }
}
