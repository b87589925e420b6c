//! Correlation of container statuses to declared containers

use k8s_openapi::api::core::v1::Pod;

use crate::error::{Error, Result};

/// Index of the named container within the pod's declared containers.
///
/// Status entries are not guaranteed to share the spec's ordering, so the
/// match is always by name. A missing match means the snapshot is
/// inconsistent and is reported as [`Error::NotFound`].
pub fn find_spec_index(container_name: &str, pod: &Pod) -> Result<usize> {
    pod.spec
        .as_ref()
        .and_then(|spec| {
            spec.containers
                .iter()
                .position(|container| container.name == container_name)
        })
        .ok_or_else(|| Error::NotFound {
            container: container_name.to_string(),
            pod: pod.metadata.name.clone().unwrap_or_default(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::tests::fixtures::{pod, status};

    #[test]
    fn test_matches_by_name_not_position() {
        // Status order is the reverse of the declared order
        let p = pod(
            "reordered",
            &["app", "sidecar", "proxy"],
            vec![
                status("proxy", Some(137)),
                status("sidecar", Some(0)),
                status("app", Some(0)),
            ],
        );

        assert_eq!(find_spec_index("proxy", &p).unwrap(), 2);
        assert_eq!(find_spec_index("sidecar", &p).unwrap(), 1);
        assert_eq!(find_spec_index("app", &p).unwrap(), 0);
    }

    #[test]
    fn test_missing_container_is_not_found() {
        let p = pod("web-0", &["app"], vec![]);

        let err = find_spec_index("ghost", &p).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound { ref container, ref pod } if container == "ghost" && pod == "web-0"
        ));
    }

    #[test]
    fn test_pod_without_spec_is_not_found() {
        assert!(matches!(
            find_spec_index("app", &Pod::default()),
            Err(Error::NotFound { .. })
        ));
    }
}
