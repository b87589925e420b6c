//! The OOMKilled container report

use anyhow::{Context, Result};
use oomd_lib::{
    connect, load_config, resolve_namespace, ConnectionOptions, Namespace, SortField,
    TerminatedContainers,
};
use tracing::info;

/// Inputs of a single report invocation
#[derive(Debug, Clone, Default)]
pub struct ReportArgs {
    pub namespace: Option<String>,
    pub all_namespaces: bool,
    pub sort_field: Option<SortField>,
    pub connection: ConnectionOptions,
}

/// Find OOMKilled containers for the resolved namespace
///
/// Returns the namespace the scan covered along with the records, sorted
/// when a sort field was requested and in discovery order otherwise.
pub async fn find_oom_killed(args: &ReportArgs) -> Result<(Namespace, TerminatedContainers)> {
    let config = load_config(&args.connection)
        .await
        .context("Unable to load Kubernetes configuration")?;

    let namespace = resolve_namespace(args.namespace.as_deref(), args.all_namespaces, &config)
        .context("Unable to determine namespace")?;
    info!(namespace = %namespace, "Resolved namespace");

    let cluster = connect(config).context("Unable to get Kubernetes client")?;

    let mut containers = oomd_lib::run(&cluster, &namespace)
        .await
        .context("Unable to build terminated pod information")?;

    if let Some(field) = args.sort_field {
        field.apply(&mut containers);
    }

    Ok((namespace, containers))
}
