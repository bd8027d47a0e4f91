//! Command execution helpers for `jobboard`.
//!
//! This module owns the runtime flow for each subcommand: session and client
//! setup, the API call, and rendering the result to stdout.

use std::io::{ErrorKind, Write};
use std::sync::Arc;

use log::{error, warn};
use serde::Serialize;
use termimad::MadSkin;

use crate::api::{GraphQLClient, HttpOptions, resolve_endpoint};
use crate::auth::{Session, TokenSession, resolve_access_token};
use crate::cli_args::{CompanyArgs, CreateJobArgs, GlobalArgs, JobArgs, JobsArgs};
use crate::models::CreateJobInput;
use crate::printer::{write_company, write_job, write_job_list, write_json};
use crate::{JobBoardError, create_job, load_company, load_job, load_jobs};

fn caused_by_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|c| {
        c.downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == ErrorKind::BrokenPipe)
    })
}

/// Run a printing closure against locked stdout.
///
/// A closed stdout (for example `jobboard jobs | head -1`) is not an error;
/// other write failures are logged.
fn emit<F>(print: F)
where
    F: FnOnce(&mut std::io::StdoutLock<'static>) -> anyhow::Result<()>,
{
    let mut handle = std::io::stdout().lock();
    if let Err(e) = print(&mut handle) {
        if caused_by_broken_pipe(&e) {
            return;
        }
        error!("error writing output: {e}");
    }
}

fn emit_json<T: Serialize + ?Sized>(value: &T) {
    emit(|out| write_json(out, value));
}

fn emit_line(line: &str) {
    emit(|out| writeln!(out, "{line}").map_err(anyhow::Error::from));
}

/// Build the session for this invocation from the resolved token.
pub(crate) fn build_session(global: &GlobalArgs) -> Arc<dyn Session> {
    let token = resolve_access_token(global.token.as_deref());
    if token.is_empty() {
        warn!("no access token set, using anonymous API access");
    }
    Arc::new(TokenSession::new(token))
}

/// Create a [`GraphQLClient`], falling back to no transcript on failure.
pub(crate) fn build_graphql_client(
    session: Arc<dyn Session>,
    global: &GlobalArgs,
) -> Result<GraphQLClient, JobBoardError> {
    let endpoint = resolve_endpoint(global.endpoint.as_deref())?;
    let options = HttpOptions::from_secs(global.http_timeout, global.connect_timeout);
    match GraphQLClient::with_options(
        Arc::clone(&session),
        endpoint.clone(),
        global.transcript.clone(),
        options,
    ) {
        Err(JobBoardError::Io(e)) => {
            warn!("failed to create transcript: {e}");
            GraphQLClient::with_options(session, endpoint, None, options)
        }
        other => other,
    }
}

pub async fn run_jobs(args: JobsArgs, global: &GlobalArgs) -> Result<(), JobBoardError> {
    let client = build_graphql_client(build_session(global), global)?;
    let jobs = load_jobs(&client).await?;
    if args.json {
        emit_json(&jobs);
    } else {
        emit(|out| write_job_list(out, &jobs));
    }
    Ok(())
}

pub async fn run_job(args: JobArgs, global: &GlobalArgs) -> Result<(), JobBoardError> {
    let id = args
        .id
        .as_deref()
        .ok_or_else(|| JobBoardError::InvalidVariables("a job id is required".into()))?;
    let client = build_graphql_client(build_session(global), global)?;
    match load_job(&client, id).await? {
        Some(job) if args.json => emit_json(&job),
        Some(job) => emit(|out| write_job(out, &MadSkin::default(), &job)),
        None => emit_line(&format!("No job with id {id}.")),
    }
    Ok(())
}

pub async fn run_company(args: CompanyArgs, global: &GlobalArgs) -> Result<(), JobBoardError> {
    let id = args
        .id
        .as_deref()
        .ok_or_else(|| JobBoardError::InvalidVariables("a company id is required".into()))?;
    let client = build_graphql_client(build_session(global), global)?;
    match load_company(&client, id).await? {
        Some(company) if args.json => emit_json(&company),
        Some(company) => emit(|out| write_company(out, &MadSkin::default(), &company)),
        None => emit_line(&format!("No company with id {id}.")),
    }
    Ok(())
}

pub async fn run_create_job(args: CreateJobArgs, global: &GlobalArgs) -> Result<(), JobBoardError> {
    let title = args
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| JobBoardError::InvalidVariables("a job title is required".into()))?;
    let session = build_session(global);
    if !session.is_logged_in() {
        return Err(JobBoardError::MissingAuth);
    }
    let client = build_graphql_client(session, global)?;
    let input = CreateJobInput {
        title,
        description: args.description,
    };
    let job = create_job(&client, &input).await?;
    if args.json {
        emit_json(&job);
    } else {
        emit(|out| write_job(out, &MadSkin::default(), &job));
    }
    Ok(())
}
