//! Kubernetes-backed collaborators for the scan
//!
//! Loads the cluster configuration from a kubeconfig (or the in-cluster
//! environment) and lists pods through the kube client.

use std::path::PathBuf;
use std::time::Duration;

use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use tracing::debug;

use crate::error::{BoxError, Error, Result};
use crate::namespace::{DefaultNamespaceProvider, Namespace};
use crate::scan::{async_trait, ClusterQuery};

/// How to reach the cluster
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    /// Explicit kubeconfig file, instead of `KUBECONFIG` or `~/.kube/config`
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use instead of the current one
    pub context: Option<String>,
    /// Read timeout for API requests
    pub request_timeout: Option<Duration>,
}

/// Load the cluster configuration described by `options`
pub async fn load_config(options: &ConnectionOptions) -> Result<Config> {
    let kube_options = KubeConfigOptions {
        context: options.context.clone(),
        ..Default::default()
    };

    let mut config = match (&options.kubeconfig, &options.context) {
        (Some(path), _) => {
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                Error::config(format!("failed to read kubeconfig {}: {e}", path.display()))
            })?;
            Config::from_custom_kubeconfig(kubeconfig, &kube_options)
                .await
                .map_err(|e| Error::config(e.to_string()))?
        }
        (None, Some(_)) => Config::from_kubeconfig(&kube_options)
            .await
            .map_err(|e| Error::config(e.to_string()))?,
        (None, None) => Config::infer()
            .await
            .map_err(|e| Error::config(e.to_string()))?,
    };

    if let Some(timeout) = options.request_timeout {
        config.read_timeout = Some(timeout);
    }

    debug!(
        cluster_url = %config.cluster_url,
        default_namespace = %config.default_namespace,
        "Loaded cluster configuration"
    );
    Ok(config)
}

/// Build a pod lister from a loaded configuration
pub fn connect(config: Config) -> Result<KubeClusterQuery> {
    let client = Client::try_from(config).map_err(Error::query)?;
    Ok(KubeClusterQuery::new(client))
}

impl DefaultNamespaceProvider for Config {
    /// Namespace of the selected kubeconfig context, "default" when the
    /// context does not set one
    fn current(&self) -> Result<String> {
        if self.default_namespace.is_empty() {
            return Err(Error::config("current context has no namespace"));
        }
        Ok(self.default_namespace.clone())
    }
}

/// Lists pods through the Kubernetes API
#[derive(Clone)]
pub struct KubeClusterQuery {
    client: Client,
}

impl KubeClusterQuery {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterQuery for KubeClusterQuery {
    async fn list_pods(&self, namespace: &Namespace) -> std::result::Result<Vec<Pod>, BoxError> {
        let api: Api<Pod> = match namespace {
            Namespace::All => Api::all(self.client.clone()),
            Namespace::Named(ns) => Api::namespaced(self.client.clone(), ns),
        };

        let pods = api.list(&ListParams::default()).await?;
        Ok(pods.items)
    }
}
