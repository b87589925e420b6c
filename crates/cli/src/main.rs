//! kubectl-oomd
//!
//! Shows containers that were recently terminated by Kubernetes due to an
//! "Out Of Memory" error. Installed on `PATH`, it runs as `kubectl oomd`.

mod commands;
mod config;
mod output;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use commands::report::{self, ReportArgs};
use oomd_lib::{ConnectionOptions, SortField};
use output::{OutputFormat, RenderOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Show pods which have recently been OOMKilled
#[derive(Parser)]
#[command(name = "kubectl-oomd")]
#[command(
    author,
    version,
    about = "Show pods which have recently been OOMKilled",
    long_about = "Show pods which have recently been terminated by Kubernetes \
                  due to an 'Out Of Memory' error"
)]
pub struct Cli {
    /// Namespace to look in (uses the current context's namespace if not specified)
    #[arg(long, short)]
    pub namespace: Option<String>,

    /// Show OOMKilled containers across all namespaces
    #[arg(long, short = 'A')]
    pub all_namespaces: bool,

    /// Don't print headers
    #[arg(long)]
    pub no_headers: bool,

    /// Sort the output by a field (supported: time)
    #[arg(long)]
    pub sort_field: Option<String>,

    /// Path to kubeconfig file (uses default if not specified)
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,

    /// Output format
    #[arg(long, short)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Log format for diagnostics written to stderr
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

fn init_tracing(verbose: bool, format: LogFormat) {
    let default_filter = if verbose {
        "warn,oomd_lib=debug,kubectl_oomd=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Diagnostics go to stderr so stdout only carries the report
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

/// Sort field from the flag, falling back to the configured default
fn resolve_sort_field(cli: &Cli, config: &config::Config) -> Result<Option<SortField>> {
    let field = cli.sort_field.as_ref().or(config.sort_field.as_ref());
    Ok(field.map(|f| f.parse::<SortField>()).transpose()?)
}

/// Render options from the flags, falling back to the configured defaults
fn resolve_render_options(cli: &Cli, config: &config::Config) -> RenderOptions {
    RenderOptions {
        format: cli.format.or(config.format).unwrap_or_default(),
        no_headers: cli.no_headers || config.no_headers.unwrap_or(false),
        show_namespace: false,
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let config = config::Config::load()?;

    // Validate the sort field before touching the cluster
    let sort_field = resolve_sort_field(&cli, &config)?;
    let mut options = resolve_render_options(&cli, &config);

    let args = ReportArgs {
        namespace: cli.namespace,
        all_namespaces: cli.all_namespaces,
        sort_field,
        connection: ConnectionOptions {
            kubeconfig: cli.kubeconfig,
            context: cli.context,
            request_timeout: config.request_timeout(),
        },
    };

    let (namespace, containers) = report::find_oom_killed(&args).await?;
    options.show_namespace = namespace.is_all();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    output::render_report(&mut out, &containers, &namespace, options)?;
    out.flush().context("Failed to write report")?;

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    if let Err(err) = execute(cli).await {
        output::print_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
