//! GraphQL gateway for the job board API.
//!
//! [`GraphQLClient`] turns a GraphQL document plus variables into a single
//! JSON POST, attaches a bearer token when the session is signed in, and
//! hands back the response's `data` or a [`crate::JobBoardError`].

mod client;
mod options;

pub use client::{
    DEFAULT_GRAPHQL_URL, ENDPOINT_ENV, Endpoint, GraphQLClient, Query, Token, resolve_endpoint,
};
pub use options::HttpOptions;
