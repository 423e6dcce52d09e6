//! Command routing and execution
//!
//! This module resolves configuration for a parsed command line and routes
//! the command to the packing library.

use crate::cli::args::{Commands, SourceArgs};
use crate::config::{loader, PackConfig};
use crate::pack::{self, EntryReport, EntryStatus, ExcludeRules, PackOptions};
use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// A command paired with the configuration it runs under.
#[derive(Debug)]
pub struct Invocation {
    pub command: Commands,
    pub config: PackConfig,
}

impl Invocation {
    /// Resolve configuration for `command`; no subcommand means `pack` of
    /// the current directory.
    pub fn resolve(command: Option<Commands>) -> Result<Self> {
        let command = command.unwrap_or_else(|| Commands::Pack {
            source: SourceArgs::default(),
            output: None,
            placeholder: None,
        });

        let config_path = command.source().config.as_deref();
        let config = loader::load(config_path).context("Failed to load configuration")?;

        Ok(Self { command, config })
    }

    pub fn configured_log_level(&self) -> Option<&str> {
        self.config.log_level.as_deref()
    }
}

impl Commands {
    pub fn source(&self) -> &SourceArgs {
        match self {
            Commands::Pack { source, .. } | Commands::List { source } => source,
        }
    }
}

/// Build pack options from config, with command line flags taking precedence.
fn build_options(source: &SourceArgs, config: &PackConfig) -> Result<PackOptions> {
    let root = source.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut opts = config.pack_options(root)?;
    if !source.exclude.is_empty() {
        opts = opts.with_exclude(ExcludeRules::from_patterns(&source.exclude)?);
    }
    Ok(opts)
}

/// Execute a resolved command
pub fn execute_command(invocation: Invocation) -> Result<()> {
    let Invocation { command, config } = invocation;
    match command {
        Commands::Pack {
            source,
            output,
            placeholder,
        } => {
            let mut opts = build_options(&source, &config)?;
            if let Some(output) = output {
                opts = opts.with_output(output);
            }
            if let Some(placeholder) = placeholder {
                opts = opts.with_placeholder(placeholder);
            }
            run_pack(&opts)
        }
        Commands::List { source } => {
            let opts = build_options(&source, &config)?;
            run_list(&opts)
        }
    }
}

fn run_pack(opts: &PackOptions) -> Result<()> {
    let summary =
        pack::pack(opts).with_context(|| format!("Failed to pack {}", opts.root.display()))?;
    debug!("Pack summary: {:?}", summary);
    Ok(())
}

fn run_list(opts: &PackOptions) -> Result<()> {
    let reports = pack::inspect(opts)
        .with_context(|| format!("Failed to inspect {}", opts.root.display()))?;

    for line in render_table(&reports) {
        println!("{line}");
    }

    let invalid = reports.iter().filter(|r| r.is_invalid()).count();
    let excluded = reports
        .iter()
        .filter(|r| r.status == EntryStatus::Excluded)
        .count();
    println!(
        "{} instances, {} excluded, {} invalid",
        reports.len() - excluded - invalid,
        excluded,
        invalid
    );

    if invalid > 0 {
        bail!(
            "{} invalid instance file(s) in {}",
            invalid,
            opts.root.display()
        );
    }
    Ok(())
}

fn render_table(reports: &[EntryReport]) -> Vec<String> {
    let name_width = reports
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once("ENTRY".len()))
        .max()
        .unwrap_or(0);
    let label_width = reports
        .iter()
        .map(|r| r.label.len())
        .chain(std::iter::once("LABEL".len()))
        .max()
        .unwrap_or(0);

    let row = |name: &str, label: &str, status: &str| {
        format!("{name:<name_width$}  {label:<label_width$}  {status}")
    };

    std::iter::once(row("ENTRY", "LABEL", "STATUS"))
        .chain(reports.iter().map(|r| {
            let status = match &r.status {
                EntryStatus::Excluded => "excluded".to_string(),
                EntryStatus::Instance {
                    header,
                    payload_lines,
                } => format!("n={} C={} lines={}", header.n, header.c, payload_lines),
                EntryStatus::Invalid(reason) => format!("invalid: {reason}"),
            };
            row(&r.name, &r.label, &status)
        }))
        .collect()
}
