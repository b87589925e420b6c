//! Core library for the `kubectl oomd` report
//!
//! This crate provides the core functionality for:
//! - Resolving the namespace a report is scoped to
//! - Detecting containers whose last termination was an OOM kill
//! - Correlating terminated containers back to their declared resources
//! - Building and ordering termination records
//! - Talking to the cluster through kube

pub mod cluster;
pub mod error;
pub mod models;
pub mod namespace;
pub mod observability;
pub mod quantity;
pub mod scan;

pub use cluster::{connect, load_config, ConnectionOptions, KubeClusterQuery};
pub use error::{BoxError, Error, Result};
pub use models::*;
pub use namespace::{resolve_namespace, DefaultNamespaceProvider, Namespace};
pub use observability::StructuredLogger;
pub use scan::{
    build_record, find_spec_index, is_oom_terminated, run, select_oom_pods, ClusterQuery,
    OOM_EXIT_CODE,
};
