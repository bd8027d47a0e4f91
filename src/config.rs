//! Configuration loading helpers.
//!
//! Wraps `ortho_config` so that sub-commands whose required arguments are
//! only given on the command line still load: a config file rarely names a
//! job id, and the merge must not fail because of that.

use figment::error::{Error as FigmentError, Kind as FigmentKind};
use ortho_config::{OrthoConfig, OrthoError, load_and_merge_subcommand_for};

use crate::cli_args::GlobalArgs;

fn missing_required(err: &FigmentError, required: &[&str]) -> bool {
    // FigmentError yields its causes only by value; clone to inspect without ownership.
    err.clone().into_iter().any(|e| {
        matches!(e.kind, FigmentKind::MissingField(ref f) if required.contains(&&**f))
    })
}

/// Merge file and environment configuration into `cli_args`, falling back to
/// the command-line values when one of `required` is missing from every
/// source.
///
/// # Errors
///
/// Returns an [`OrthoError`] if configuration gathering fails for any other
/// reason.
#[expect(
    clippy::result_large_err,
    reason = "configuration loading errors can be verbose"
)]
pub fn load_with_cli_fallback<T>(cli_args: T, required: &[&str]) -> Result<T, OrthoError>
where
    T: OrthoConfig + serde::Serialize + Default + clap::CommandFactory + Clone,
{
    match load_and_merge_subcommand_for::<T>(&cli_args) {
        Ok(v) => Ok(v),
        Err(OrthoError::Gathering(e)) => {
            if missing_required(&e, required) {
                Ok(cli_args)
            } else {
                Err(OrthoError::Gathering(e))
            }
        }
        Err(e) => Err(e),
    }
}

/// Load global options, letting command-line flags override configured ones.
///
/// # Errors
///
/// Returns an [`OrthoError`] if the configuration file cannot be parsed.
#[expect(
    clippy::result_large_err,
    reason = "configuration loading errors can be verbose"
)]
pub fn load_global(cli: GlobalArgs) -> Result<GlobalArgs, OrthoError> {
    let mut merged = load_and_merge_subcommand_for::<GlobalArgs>(&GlobalArgs::default())?;
    merged.merge(cli);
    Ok(merged)
}
