//! Filter command - keep the candidates that satisfy a specifier set.

use anyhow::{Context as _, Result};
use clap::Args;
use pox_specifiers::SpecifierSet;
use std::io::{BufRead, IsTerminal};

use crate::config::OutputFormat;
use crate::Context;

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Comma separated specifiers, e.g. "~=1.4"
    pub specifiers: String,

    /// Candidate versions (read from stdin, one per line, when omitted)
    pub versions: Vec<String>,
}

/// Keep the matching candidates in their original order; invalid versions are dropped
pub fn filter_versions(set: &SpecifierSet, candidates: &[String]) -> Vec<String> {
    set.filter(candidates, None).cloned().collect()
}

fn read_candidates(reader: impl BufRead) -> Result<Vec<String>> {
    let mut candidates = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read candidates from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            candidates.push(line.to_string());
        }
    }
    Ok(candidates)
}

pub fn execute(args: FilterArgs, ctx: &Context) -> Result<u8> {
    let set = SpecifierSet::parse(&args.specifiers)?;

    let candidates = if args.versions.is_empty() {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            log::warn!("Reading candidates from the terminal, finish with EOF");
        }
        read_candidates(stdin.lock())?
    } else {
        args.versions
    };

    let kept = filter_versions(&set, &candidates);
    log::info!("{} of {} candidate(s) satisfy {}", kept.len(), candidates.len(), set);

    match ctx.format {
        OutputFormat::Text => {
            for version in &kept {
                println!("{}", version);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&kept)?),
    }

    Ok(0)
}
