//! Output formatting utilities

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use oomd_lib::{Namespace, TerminatedContainers, TerminationRecord};
use serde::Deserialize;
use tabled::{builder::Builder, settings::Style};

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// How a report is rendered
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub no_headers: bool,
    /// Add a namespace column, used when listing across all namespaces
    pub show_namespace: bool,
}

const HEADERS: [&str; 5] = ["POD", "CONTAINER", "REQUEST", "LIMIT", "TERMINATION TIME"];

/// Write the report for `containers` to `out`
pub fn render_report<W: Write>(
    out: &mut W,
    containers: &TerminatedContainers,
    scope: &Namespace,
    options: RenderOptions,
) -> Result<()> {
    match options.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, containers)?;
            writeln!(out)?;
        }
        OutputFormat::Table => {
            if containers.is_empty() {
                writeln!(out, "{}", empty_message(scope))?;
                return Ok(());
            }
            writeln!(out, "{}", build_table(containers, options))?;
        }
    }

    Ok(())
}

fn empty_message(scope: &Namespace) -> String {
    match scope {
        Namespace::All => "No OOMKilled containers found in any namespace".to_string(),
        Namespace::Named(ns) => format!("No OOMKilled containers found in {ns} namespace"),
    }
}

fn build_table(containers: &TerminatedContainers, options: RenderOptions) -> String {
    let mut builder = Builder::default();

    if !options.no_headers {
        let mut header: Vec<String> = Vec::with_capacity(HEADERS.len() + 1);
        if options.show_namespace {
            header.push("NAMESPACE".to_string());
        }
        header.extend(HEADERS.iter().map(|h| h.to_string()));
        builder.push_record(header);
    }

    for record in containers {
        builder.push_record(row(record, options.show_namespace));
    }

    let mut table = builder.build();
    table.with(Style::blank());
    table.to_string()
}

fn row(record: &TerminationRecord, show_namespace: bool) -> Vec<String> {
    let mut row = Vec::with_capacity(HEADERS.len() + 1);
    if show_namespace {
        row.push(record.pod.namespace.clone());
    }
    row.extend([
        record.pod.name.clone(),
        record.container_name.clone(),
        record.memory.request.clone(),
        record.memory.limit.clone(),
        record.terminated_time.clone(),
    ]);
    row
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}
