//! Command-line argument structures.
//!
//! Isolates clap derivations so `main.rs` stays focused on dispatch. Each
//! struct also derives `OrthoConfig`, so values can come from
//! `.jobboard.toml` (or `JOBBOARD_CONFIG_PATH`) and the environment, with
//! command-line flags taking precedence.

use clap::Parser;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Options shared by every sub-command.
///
/// Config files set these under `[cmds.global]`.
#[derive(Parser, Deserialize, Serialize, Default, Debug, OrthoConfig, Clone)]
#[command(name = "global")]
#[ortho_config(prefix = "JOBBOARD")]
pub struct GlobalArgs {
    /// GraphQL endpoint URL (defaults to `JOBBOARD_GRAPHQL_URL`, then
    /// http://localhost:9000/graphql)
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
    /// Access token for authenticated requests
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,
    /// Write HTTP transcript to this file for debugging
    #[arg(long, value_name = "FILE")]
    pub transcript: Option<std::path::PathBuf>,
    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub http_timeout: Option<u64>,
    /// HTTP connection timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,
}

impl GlobalArgs {
    /// Merge another instance into `self`, letting `other`'s present values
    /// win.
    ///
    /// CLI flags have higher priority than configuration sources.
    pub fn merge(&mut self, other: Self) {
        self.endpoint = other.endpoint.or_else(|| self.endpoint.take());
        self.token = other.token.or_else(|| self.token.take());
        self.transcript = other.transcript.or_else(|| self.transcript.take());
        self.http_timeout = other.http_timeout.or_else(|| self.http_timeout.take());
        self.connect_timeout = other
            .connect_timeout
            .or_else(|| self.connect_timeout.take());
    }
}

/// Parameters accepted by the `jobs` sub-command.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "jobs")]
#[ortho_config(prefix = "JOBBOARD")]
pub struct JobsArgs {
    /// Print the raw JSON result instead of formatted text
    #[arg(long)]
    #[serde(default, skip_serializing_if = "crate::bool_predicates::not")]
    pub json: bool,
}

/// Parameters accepted by the `job` sub-command.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "job")]
#[ortho_config(prefix = "JOBBOARD")]
pub struct JobArgs {
    /// Job id
    #[arg(required = true)]
    // Clap requires the argument; `Option` lets defaults and config merging
    // leave it unset.
    pub id: Option<String>,
    /// Print the raw JSON result instead of formatted text
    #[arg(long)]
    #[serde(default, skip_serializing_if = "crate::bool_predicates::not")]
    pub json: bool,
}

/// Parameters accepted by the `company` sub-command.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "company")]
#[ortho_config(prefix = "JOBBOARD")]
pub struct CompanyArgs {
    /// Company id
    #[arg(required = true)]
    pub id: Option<String>,
    /// Print the raw JSON result instead of formatted text
    #[arg(long)]
    #[serde(default, skip_serializing_if = "crate::bool_predicates::not")]
    pub json: bool,
}

/// Parameters accepted by the `create-job` sub-command.
#[derive(Parser, Deserialize, Serialize, Debug, OrthoConfig, Clone, Default)]
#[command(name = "create-job")]
#[ortho_config(prefix = "JOBBOARD")]
pub struct CreateJobArgs {
    /// Job title
    #[arg(long, required = true)]
    pub title: Option<String>,
    /// Job description (markdown)
    #[arg(long)]
    pub description: Option<String>,
    /// Print the raw JSON result instead of formatted text
    #[arg(long)]
    #[serde(default, skip_serializing_if = "crate::bool_predicates::not")]
    pub json: bool,
}
