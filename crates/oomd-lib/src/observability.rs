//! Structured logging for scan events
//!
//! Events are emitted through `tracing`; the binary decides where they go
//! and in which format.

use tracing::{debug, info};

use crate::models::TerminationRecord;

/// Structured logger for a single scan
///
/// Provides consistent field names for scan progress and detected OOM kills.
#[derive(Clone)]
pub struct StructuredLogger {
    scope: String,
}

impl StructuredLogger {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    /// Log the start of a scan
    pub fn log_scan_started(&self) {
        debug!(
            event = "scan_started",
            scope = %self.scope,
            "Listing pods"
        );
    }

    /// Log the outcome of the pod listing
    pub fn log_pods_listed(&self, total: usize, candidates: usize) {
        debug!(
            event = "pods_listed",
            scope = %self.scope,
            pods = total,
            oom_pods = candidates,
            "Listed pods"
        );
    }

    /// Log a detected OOM kill
    pub fn log_oom_detected(&self, record: &TerminationRecord) {
        info!(
            event = "oom_detected",
            scope = %self.scope,
            pod_name = %record.pod.name,
            namespace = %record.pod.namespace,
            container = %record.container_name,
            memory_request = %record.memory.request,
            memory_limit = %record.memory.limit,
            terminated_time = %record.terminated_time,
            "OOMKilled container found"
        );
    }

    /// Log the end of a scan
    pub fn log_scan_completed(&self, records: usize) {
        debug!(
            event = "scan_completed",
            scope = %self.scope,
            records = records,
            "Scan completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("kube-system");
        assert_eq!(logger.scope, "kube-system");
    }
}
