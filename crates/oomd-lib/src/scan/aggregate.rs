//! Orchestration of a single OOM scan

use crate::error::{Error, Result};
use crate::models::TerminatedContainers;
use crate::namespace::Namespace;
use crate::observability::StructuredLogger;

use super::{build_record, find_spec_index, oom_statuses, select_oom_pods, ClusterQuery};

/// List pods in `namespace` and return a record for every OOM-killed
/// container, in discovery order.
///
/// A failed listing or an OOM-killed container with no declared counterpart
/// fails the whole scan; no partial results are returned.
pub async fn run<Q>(cluster: &Q, namespace: &Namespace) -> Result<TerminatedContainers>
where
    Q: ClusterQuery + ?Sized,
{
    let logger = StructuredLogger::new(namespace.to_string());
    logger.log_scan_started();

    let pods = cluster.list_pods(namespace).await.map_err(Error::query)?;
    let candidates = select_oom_pods(&pods);
    logger.log_pods_listed(pods.len(), candidates.len());

    let mut containers = TerminatedContainers::new();
    for pod in candidates {
        for status in oom_statuses(pod) {
            let spec_index = find_spec_index(&status.name, pod)?;
            let record = build_record(pod, status, spec_index)?;
            logger.log_oom_detected(&record);
            containers.push(record);
        }
    }

    logger.log_scan_completed(containers.len());
    Ok(containers)
}
