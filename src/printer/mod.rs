//! Helpers for printing jobs and companies.
//!
//! Descriptions are markdown and are rendered with `termimad`. Writers are
//! passed in so the output can be unit tested without capturing stdout.

use serde::Serialize;
use termimad::MadSkin;

use crate::models::{Company, Job};

fn write_heading<W: std::io::Write>(out: &mut W, icon: &str, text: &str) -> std::io::Result<()> {
    writeln!(out, "{icon}  \x1b[1m{text}\x1b[0m")
}

fn write_markdown<W: std::io::Write>(
    out: &mut W,
    skin: &MadSkin,
    text: Option<&str>,
) -> anyhow::Result<()> {
    match text.map(str::trim).filter(|t| !t.is_empty()) {
        Some(body) => skin
            .write_text_on(out, body)
            .map_err(anyhow::Error::from)?,
        None => writeln!(out, "(no description)")?,
    }
    Ok(())
}

/// Write a one-line entry per job: title, company and id.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_job_list<W: std::io::Write>(mut out: W, jobs: &[Job]) -> anyhow::Result<()> {
    if jobs.is_empty() {
        writeln!(out, "No jobs posted.")?;
        return Ok(());
    }
    for job in jobs {
        let company = job.company.as_ref().map_or("(unknown company)", |c| c.name.as_str());
        writeln!(out, "\x1b[1m{}\x1b[0m  {company}  [{}]", job.title, job.id)?;
    }
    Ok(())
}

/// Write a job's title, company and rendered description.
///
/// # Errors
///
/// Returns an error if writing to `out` or rendering the markdown fails.
pub fn write_job<W: std::io::Write>(mut out: W, skin: &MadSkin, job: &Job) -> anyhow::Result<()> {
    write_heading(&mut out, "💼", &job.title)?;
    match &job.company {
        Some(company) => writeln!(out, "at {} [{}]", company.name, company.id)?,
        None => writeln!(out, "at (unknown company)")?,
    }
    writeln!(out, "id: {}", job.id)?;
    writeln!(out)?;
    write_markdown(&mut out, skin, job.description.as_deref())?;
    Ok(())
}

/// Write a company's name, rendered description and its jobs.
///
/// # Errors
///
/// Returns an error if writing to `out` or rendering the markdown fails.
pub fn write_company<W: std::io::Write>(
    mut out: W,
    skin: &MadSkin,
    company: &Company,
) -> anyhow::Result<()> {
    write_heading(&mut out, "🏢", &company.name)?;
    writeln!(out, "id: {}", company.id)?;
    writeln!(out)?;
    write_markdown(&mut out, skin, company.description.as_deref())?;
    writeln!(out)?;
    if company.jobs.is_empty() {
        writeln!(out, "No open jobs.")?;
        return Ok(());
    }
    writeln!(out, "Jobs:")?;
    for job in &company.jobs {
        writeln!(out, "  - {} [{}]", job.title, job.id)?;
    }
    Ok(())
}

/// Write `value` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialisation or writing fails.
pub fn write_json<W: std::io::Write, T: Serialize + ?Sized>(
    mut out: W,
    value: &T,
) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
