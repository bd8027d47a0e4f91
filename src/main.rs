//! `jobboard`: browse and post jobs through the job board GraphQL API.

use clap::{Parser, Subcommand};
use log::error;

use jobboard::cli_args::{CompanyArgs, CreateJobArgs, GlobalArgs, JobArgs, JobsArgs};
use jobboard::commands::{run_company, run_create_job, run_job, run_jobs};
use jobboard::config::{load_global, load_with_cli_fallback};
use jobboard::{ErrorKind, JobBoardError};

#[derive(Parser)]
#[command(
    name = "jobboard",
    about = "Browse and post jobs on a job board GraphQL API",
    version
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every job
    Jobs(JobsArgs),
    /// Show one job with its description
    Job(JobArgs),
    /// Show a company and the jobs it has posted
    Company(CompanyArgs),
    /// Create a job (requires an access token)
    CreateJob(CreateJobArgs),
}

async fn run(cli: Cli) -> Result<(), JobBoardError> {
    let global = load_global(cli.global)?;
    match cli.command {
        Commands::Jobs(args) => {
            let args = load_with_cli_fallback(args, &[])?;
            run_jobs(args, &global).await
        }
        Commands::Job(args) => {
            let args = load_with_cli_fallback(args, &["id"])?;
            run_job(args, &global).await
        }
        Commands::Company(args) => {
            let args = load_with_cli_fallback(args, &["id"])?;
            run_company(args, &global).await
        }
        Commands::CreateJob(args) => {
            let args = load_with_cli_fallback(args, &["title"])?;
            run_create_job(args, &global).await
        }
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    match run(Cli::parse()).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            match e.kind() {
                ErrorKind::GraphQl => error!("server rejected the request: {e}"),
                ErrorKind::Transport => error!("request failed: {e}"),
                ErrorKind::Local => error!("{e}"),
            }
            std::process::ExitCode::FAILURE
        }
    }
}
