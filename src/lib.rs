//! Client library for a job board GraphQL API.
//!
//! [`GraphQLClient`] is the request gateway; [`load_jobs`], [`load_job`],
//! [`load_company`] and [`create_job`] are the typed call sites built on it.
//! The remaining modules back the `jobboard` binary and integration tests.

pub mod api;
pub mod auth;
pub mod bool_predicates;
pub mod cli_args;
pub mod commands;
pub mod companies;
pub mod config;
pub mod environment;
pub mod error;
pub mod graphql_queries;
pub mod jobs;
pub mod models;
pub mod printer;
pub mod test_utils;

pub use api::{Endpoint, GraphQLClient, HttpOptions, Query, Token};
pub use auth::{Anonymous, Session, SessionStore, TokenSession};
pub use cli_args::{CompanyArgs, CreateJobArgs, GlobalArgs, JobArgs, JobsArgs};
pub use companies::load_company;
pub use error::{ErrorKind, JobBoardError};
pub use jobs::{create_job, load_job, load_jobs};
pub use models::{Company, CompanyRef, CreateJobInput, Job, JobSummary};
