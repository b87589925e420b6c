//! Assembly of termination records

use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{ContainerStateTerminated, ContainerStatus, Pod};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;

use crate::error::{Error, Result};
use crate::models::{MemoryInfo, PodRef, TerminationRecord};
use crate::quantity;

const MEMORY: &str = "memory";

/// Display form used for timestamps that were not reported
const UNKNOWN_TIME: &str = "<unknown>";

/// Build the record for an OOM-killed container status.
///
/// `spec_index` is the position of the status's container within the pod's
/// declared containers, as returned by [`find_spec_index`](super::find_spec_index).
pub fn build_record(
    pod: &Pod,
    status: &ContainerStatus,
    spec_index: usize,
) -> Result<TerminationRecord> {
    let container = pod
        .spec
        .as_ref()
        .and_then(|spec| spec.containers.get(spec_index))
        .ok_or_else(|| Error::NotFound {
            container: status.name.clone(),
            pod: pod.metadata.name.clone().unwrap_or_default(),
        })?;

    let resources = container.resources.as_ref();
    let memory = MemoryInfo {
        request: quantity::display(
            resources
                .and_then(|r| r.requests.as_ref())
                .and_then(|requests| requests.get(MEMORY)),
        ),
        limit: quantity::display(
            resources
                .and_then(|r| r.limits.as_ref())
                .and_then(|limits| limits.get(MEMORY)),
        ),
    };

    let terminated: Option<&ContainerStateTerminated> = status
        .last_state
        .as_ref()
        .and_then(|state| state.terminated.as_ref());
    let finished_at = terminated.and_then(|t| t.finished_at.as_ref()).map(|t| t.0);
    let started_at = terminated.and_then(|t| t.started_at.as_ref());

    Ok(TerminationRecord {
        pod: PodRef {
            name: pod.metadata.name.clone().unwrap_or_default(),
            namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        },
        container_name: status.name.clone(),
        memory,
        reason: terminated.and_then(|t| t.reason.clone()),
        terminated_at: finished_at,
        terminated_time: finished_at
            .as_ref()
            .map_or_else(|| UNKNOWN_TIME.to_string(), format_time),
        start_time: started_at
            .map_or_else(|| UNKNOWN_TIME.to_string(), |Time(t)| format_time(t)),
    })
}

/// Format a timestamp as e.g. "2024-03-01 12:00:00 +0000 UTC"
fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S %z UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::tests::fixtures::{container, oom_status_at, pod_with, status};
    use chrono::TimeZone;

    #[test]
    fn test_builds_record_from_spec_and_status() {
        let started = Utc.with_ymd_and_hms(2024, 3, 1, 11, 58, 30).unwrap();
        let finished = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let p = pod_with(
            "oomer-7d9f",
            "oomkilled",
            vec![container("oomer", Some("64Mi"), Some("128Mi"))],
            vec![oom_status_at("oomer", started, finished)],
        );
        let status = &p.status.as_ref().unwrap().container_statuses.as_ref().unwrap()[0];

        let record = build_record(&p, status, 0).unwrap();

        assert_eq!(record.pod.name, "oomer-7d9f");
        assert_eq!(record.pod.namespace, "oomkilled");
        assert_eq!(record.container_name, "oomer");
        assert_eq!(record.memory.request, "64Mi");
        assert_eq!(record.memory.limit, "128Mi");
        assert_eq!(record.reason.as_deref(), Some("OOMKilled"));
        assert_eq!(record.terminated_at, Some(finished));
        assert_eq!(record.terminated_time, "2024-03-01 12:00:00 +0000 UTC");
        assert_eq!(record.start_time, "2024-03-01 11:58:30 +0000 UTC");
    }

    #[test]
    fn test_missing_resources_render_as_zero() {
        let p = pod_with(
            "unbounded",
            "default",
            vec![container("app", None, Some("1024Mi"))],
            vec![status("app", Some(137))],
        );
        let status = &p.status.as_ref().unwrap().container_statuses.as_ref().unwrap()[0];

        let record = build_record(&p, status, 0).unwrap();

        assert_eq!(record.memory.request, "0");
        assert_eq!(record.memory.limit, "1Gi");
        assert_eq!(record.terminated_at, None);
        assert_eq!(record.terminated_time, UNKNOWN_TIME);
        assert_eq!(record.start_time, UNKNOWN_TIME);
    }

    #[test]
    fn test_out_of_range_index_is_not_found() {
        let p = pod_with(
            "web-0",
            "default",
            vec![container("app", None, None)],
            vec![status("app", Some(137))],
        );

        assert!(matches!(
            build_record(&p, &status("app", Some(137)), 3),
            Err(Error::NotFound { .. })
        ));
    }
}
