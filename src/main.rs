use std::env;
use std::ffi::{OsStr, OsString};
use std::io;
use std::iter;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::debug;

mod burn;

use burn::{DEFAULT_DURATION, DEFAULT_JOB_ID};

/// Burn one CPU core for a while, printing a heartbeat every second.
///
/// Usage: burner [job_id] [duration_seconds]
#[derive(Parser, Debug)]
#[command(name = "burner", disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// Job id, duration in seconds, anything after that is ignored
    raw: Vec<OsString>,
}

impl Args {
    /// Parse a full argv, binary name first. Every token after the binary
    /// name is positional, `--` included.
    fn parse_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let bin = argv.next().unwrap_or_else(|| OsString::from("burner"));

        // A leading escape puts clap in trailing mode for the rest of the line.
        Self::try_parse_from(iter::once(bin).chain(iter::once("--".into())).chain(argv))
    }

    // Both values or neither: a lone job id still falls back to the defaults.
    fn resolve(self) -> Result<(OsString, i64), clap::Error> {
        let mut raw = self.raw.into_iter();
        match (raw.next(), raw.next()) {
            (Some(job_id), Some(duration)) => Ok((job_id, parse_duration(&duration)?)),
            _ => Ok((OsString::from(DEFAULT_JOB_ID), DEFAULT_DURATION)),
        }
    }
}

fn parse_duration(value: &OsStr) -> Result<i64, clap::Error> {
    value
        .to_str()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            Args::command().error(
                ErrorKind::ValueValidation,
                format!("invalid duration {:?}: expected a whole number of seconds", value),
            )
        })
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let (job_id, duration) = Args::parse_argv(env::args_os())
        .and_then(Args::resolve)
        .unwrap_or_else(|e| e.exit());
    debug!(
        "Burning job {:?} for {} seconds on 1 of {} cores",
        job_id,
        duration,
        num_cpus::get()
    );

    let mut stdout = io::stdout().lock();
    let elapsed = burn::run(&job_id, duration, &mut stdout).context("Failed to write heartbeat")?;
    debug!("Job {:?} stopped after {} seconds", job_id, elapsed);

    burn::finished(&job_id, elapsed, &mut stdout).context("Failed to write summary")?;

    Ok(())
}
