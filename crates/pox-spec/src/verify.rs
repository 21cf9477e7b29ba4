//! Verify command - check installed tool versions against the configured requirements.

use anyhow::{bail, Context as _, Result};
use clap::Args;
use console::style;
use indexmap::IndexMap;
use pox_specifiers::SpecifierSet;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Context;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Installed tool versions as NAME=VERSION
    #[arg(value_name = "NAME=VERSION")]
    pub installed: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Unmet,
    Missing,
    InvalidVersion,
}

impl Status {
    fn label(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Unmet => "unmet",
            Status::Missing => "missing",
            Status::InvalidVersion => "invalid version",
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RequirementStatus {
    pub name: String,
    pub required: String,
    pub installed: Option<String>,
    pub status: Status,
}

fn parse_installed(entries: &[String]) -> Result<IndexMap<String, String>> {
    let mut installed = IndexMap::new();
    for entry in entries {
        let Some((name, version)) = entry.split_once('=') else {
            bail!("Invalid installed tool \"{}\", expected NAME=VERSION", entry);
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("Invalid installed tool \"{}\", missing name", entry);
        }
        installed.insert(name.to_string(), version.trim().to_string());
    }
    Ok(installed)
}

/// Evaluate every requirement in order
pub fn verify(
    requirements: &IndexMap<String, String>,
    installed: &IndexMap<String, String>,
) -> Result<Vec<RequirementStatus>> {
    for name in installed.keys() {
        if !requirements.contains_key(name) {
            log::debug!("No requirement configured for {}, ignoring", name);
        }
    }

    requirements
        .iter()
        .map(|(name, specifiers)| -> Result<RequirementStatus> {
            let set = SpecifierSet::parse(specifiers)
                .with_context(|| format!("Invalid requirement for {}", name))?;
            let version = installed.get(name).cloned();

            let status = match &version {
                None => Status::Missing,
                Some(version) => match set.contains(version) {
                    Ok(true) => Status::Ok,
                    Ok(false) => Status::Unmet,
                    Err(err) => {
                        log::warn!("{}: {}", name, err);
                        Status::InvalidVersion
                    }
                },
            };

            Ok(RequirementStatus {
                name: name.clone(),
                required: set.to_string(),
                installed: version,
                status,
            })
        })
        .collect()
}

/// Returns 0 when every requirement is satisfied, 1 otherwise
pub fn execute(args: VerifyArgs, ctx: &Context) -> Result<u8> {
    if ctx.config.requirements.is_empty() {
        log::warn!("No [requirements] configured, nothing to verify");
    }

    let installed = parse_installed(&args.installed)?;
    let results = verify(&ctx.config.requirements, &installed)?;

    match ctx.format {
        OutputFormat::Text => {
            for result in &results {
                let label = match result.status {
                    Status::Ok => style(result.status.label()).green(),
                    _ => style(result.status.label()).red().bold(),
                };
                let required = if result.required.is_empty() { "*" } else { result.required.as_str() };
                println!(
                    "{:<20} {:<14} {:<24} {}",
                    result.name,
                    result.installed.as_deref().unwrap_or("-"),
                    required,
                    label
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    let failed = results.iter().filter(|r| r.status != Status::Ok).count();
    if failed > 0 {
        log::info!("{} of {} requirement(s) not satisfied", failed, results.len());
        return Ok(1);
    }
    Ok(0)
}
