//! Check command - test one version against a specifier set.

use anyhow::{Context as _, Result};
use clap::Args;
use pox_specifiers::SpecifierSet;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Context;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Version to check
    pub version: String,

    /// Comma separated specifiers, e.g. ">=1.0,<2.0"
    pub specifiers: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CheckReport {
    pub version: String,
    pub specifiers: String,
    pub satisfied: bool,
}

pub fn check(args: &CheckArgs) -> Result<CheckReport> {
    let set = SpecifierSet::parse(&args.specifiers)?;
    let satisfied = set
        .contains(&args.version)
        .with_context(|| format!("Cannot check \"{}\" against \"{}\"", args.version, set))?;

    log::info!("{} {} {}", args.version, if satisfied { "satisfies" } else { "does not satisfy" }, set);

    Ok(CheckReport {
        version: args.version.clone(),
        specifiers: set.to_string(),
        satisfied,
    })
}

/// Returns 0 when the version satisfies the specifiers, 1 otherwise
pub fn execute(args: CheckArgs, ctx: &Context) -> Result<u8> {
    let report = check(&args)?;

    match ctx.format {
        OutputFormat::Text => println!("{}", if report.satisfied { "yes" } else { "no" }),
        OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
    }

    Ok(if report.satisfied { 0 } else { 1 })
}
