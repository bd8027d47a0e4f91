//! Error type shared by the gateway, the call sites and the CLI.
//!
//! Every failure a caller can observe falls into one of three kinds: the
//! server answered with GraphQL errors, the HTTP exchange itself failed, or a
//! local precondition was not met before any request was sent.

use thiserror::Error;

/// Broad classification of a [`JobBoardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The response envelope carried a non-empty `errors` list.
    GraphQl,
    /// The network exchange failed or produced an unusable body.
    Transport,
    /// The request was rejected locally and never sent.
    Local,
}

#[derive(Error, Debug)]
pub enum JobBoardError {
    /// Newline-joined messages from the envelope's `errors` list.
    #[error("{0}")]
    GraphQl(Box<str>),
    #[error("request failed when running {context}: {source}")]
    RequestContext {
        context: Box<str>,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("HTTP status {status} | body snippet: {snippet}")]
    HttpStatus { status: u16, snippet: Box<str> },
    #[error("malformed response (status {status}): {message} | snippet: {snippet}")]
    BadResponseSerde {
        status: u16,
        message: Box<str>,
        snippet: Box<str>,
    },
    #[error("empty response (status {status}) for {operation} | snippet: {snippet}")]
    EmptyResponse {
        status: u16,
        operation: Box<str>,
        snippet: Box<str>,
    },
    #[error("invalid variables: {0}")]
    InvalidVariables(Box<str>),
    #[error("invalid endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: Box<str>,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid endpoint '{endpoint}': unsupported scheme '{scheme}', expected http or https")]
    UnsupportedScheme { endpoint: Box<str>, scheme: Box<str> },
    #[error("access token cannot be sent as an HTTP header: {0}")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),
    #[error("this operation requires a signed-in session; pass --token or set JOBBOARD_TOKEN")]
    MissingAuth,
    #[error("io error: {0}")]
    Io(#[from] Box<std::io::Error>),
    #[error("configuration error: {0}")]
    Config(#[from] Box<ortho_config::OrthoError>),
}

impl JobBoardError {
    /// Classify this error for callers that only care whether the server
    /// rejected the operation or the exchange broke down.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GraphQl(_) => ErrorKind::GraphQl,
            Self::RequestContext { .. }
            | Self::HttpStatus { .. }
            | Self::BadResponseSerde { .. }
            | Self::EmptyResponse { .. } => ErrorKind::Transport,
            Self::InvalidVariables(_)
            | Self::InvalidEndpoint { .. }
            | Self::UnsupportedScheme { .. }
            | Self::InvalidToken(_)
            | Self::MissingAuth
            | Self::Io(_)
            | Self::Config(_) => ErrorKind::Local,
        }
    }
}

impl From<std::io::Error> for JobBoardError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Box::new(e))
    }
}

impl From<ortho_config::OrthoError> for JobBoardError {
    fn from(e: ortho_config::OrthoError) -> Self {
        Self::Config(Box::new(e))
    }
}
