//! Command-line front end: read a draft as JSON, print totals or the
//! submission payload as JSON.

use crate::models::InvoiceDraft;
use crate::services::{prepare_submission, Calculator, SubmissionError};
use app_core::error::AppError;
use clap::Parser;
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

#[derive(Debug, Parser)]
#[command(
    name = "invoice-totals",
    version,
    about = "Compute invoice totals from a JSON draft"
)]
pub struct Cli {
    /// Settings file (toml, yaml or json).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the submission payload instead of the totals.
    #[arg(long)]
    pub submit: bool,

    /// Draft JSON file; stdin when omitted or `-`.
    #[arg(value_name = "DRAFT")]
    pub draft: Option<PathBuf>,
}

impl Cli {
    pub fn draft_path(&self) -> Option<&Path> {
        self.draft.as_deref().filter(|path| *path != Path::new("-"))
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Printed,
    Rejected(SubmissionError),
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Printed => 0,
            Outcome::Rejected(_) => 2,
        }
    }
}

/// Read a draft from `path`, or from `stdin` when no path is given.
pub fn read_draft(path: Option<&Path>, mut stdin: impl Read) -> Result<InvoiceDraft, AppError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!(
                "Failed to read draft {}: {}",
                path.display(),
                e
            ))
        })?,
        None => {
            let mut buf = String::new();
            stdin.read_to_string(&mut buf)?;
            buf
        }
    };

    let draft: InvoiceDraft = serde_json::from_str(&raw)?;
    debug!(items = draft.items.len(), "Draft loaded");
    Ok(draft)
}

/// Compute and print. A submission rejection is an outcome, not an error.
#[instrument(skip_all, fields(submit = submit))]
pub fn run(
    calculator: &Calculator,
    draft: &InvoiceDraft,
    submit: bool,
    mut out: impl Write,
) -> Result<Outcome, AppError> {
    if submit {
        match prepare_submission(calculator, draft) {
            Ok(submission) => write_json(&mut out, &submission)?,
            Err(reason) => return Ok(Outcome::Rejected(reason)),
        }
    } else {
        write_json(&mut out, &calculator.calculate(draft).report())?;
    }

    Ok(Outcome::Printed)
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?;
    writeln!(out)?;
    Ok(())
}
