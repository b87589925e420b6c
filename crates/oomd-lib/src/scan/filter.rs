//! Selection of pods and container statuses carrying an OOM kill

use k8s_openapi::api::core::v1::{ContainerStatus, Pod};

/// Exit code surfaced when a container is killed by the OOM handler
pub const OOM_EXIT_CODE: i32 = 137;

/// Whether the container's last termination was an OOM kill
pub fn is_oom_terminated(status: &ContainerStatus) -> bool {
    // The last state may not be terminated at all, e.g. a container that has
    // never restarted.
    status
        .last_state
        .as_ref()
        .and_then(|state| state.terminated.as_ref())
        .is_some_and(|terminated| terminated.exit_code == OOM_EXIT_CODE)
}

/// Container statuses of the pod that were OOM-killed, in status order
pub fn oom_statuses(pod: &Pod) -> impl Iterator<Item = &ContainerStatus> {
    pod.status
        .as_ref()
        .and_then(|status| status.container_statuses.as_deref())
        .unwrap_or_default()
        .iter()
        .filter(|status| is_oom_terminated(status))
}

/// Pods with at least one OOM-killed container, in input order.
///
/// A pod appears once no matter how many of its containers qualify.
pub fn select_oom_pods(pods: &[Pod]) -> Vec<&Pod> {
    pods.iter()
        .filter(|pod| oom_statuses(pod).next().is_some())
        .collect()
}
