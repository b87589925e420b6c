//! Detection of OOM-killed containers
//!
//! This module scans a point-in-time pod snapshot for containers whose last
//! termination carried the OOM exit code, correlates each one back to its
//! declared resources by name, and assembles termination records.

mod aggregate;
mod correlate;
mod filter;
mod record;


pub use aggregate::run;
pub use correlate::find_spec_index;
pub use filter::{is_oom_terminated, oom_statuses, select_oom_pods, OOM_EXIT_CODE};
pub use record::build_record;

pub use async_trait::async_trait;

use crate::error::BoxError;
use crate::namespace::Namespace;
use k8s_openapi::api::core::v1::Pod;

/// Trait for listing pods from a cluster
#[async_trait]
pub trait ClusterQuery: Send + Sync {
    /// List every pod visible in the namespace, or cluster-wide for
    /// [`Namespace::All`]
    async fn list_pods(&self, namespace: &Namespace) -> Result<Vec<Pod>, BoxError>;
}
