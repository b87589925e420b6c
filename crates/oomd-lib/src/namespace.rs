//! Resolution of the namespace a report is scoped to

use std::fmt;

use crate::error::Result;

/// Scope of a pod listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// Every namespace in the cluster
    All,
    /// A single named namespace
    Named(String),
}

impl Namespace {
    pub fn is_all(&self) -> bool {
        matches!(self, Namespace::All)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Namespace::All => f.write_str("all namespaces"),
            Namespace::Named(name) => f.write_str(name),
        }
    }
}

/// Source of the caller's default namespace, typically the current
/// kubeconfig context
pub trait DefaultNamespaceProvider {
    /// Return the current namespace, or a config error if it is unavailable
    fn current(&self) -> Result<String>;
}

/// Resolve the effective namespace.
///
/// An explicit, non-empty namespace always wins. Otherwise an all-namespaces
/// request yields [`Namespace::All`], and failing that the provider's current
/// namespace is used.
pub fn resolve_namespace<P>(
    explicit: Option<&str>,
    all_namespaces: bool,
    provider: &P,
) -> Result<Namespace>
where
    P: DefaultNamespaceProvider + ?Sized,
{
    if let Some(ns) = explicit.filter(|ns| !ns.is_empty()) {
        return Ok(Namespace::Named(ns.to_string()));
    }

    if all_namespaces {
        return Ok(Namespace::All);
    }

    provider.current().map(Namespace::Named)
}
