//! Error types for the OOM scan

use thiserror::Error;

/// Boxed error carried by a failed cluster query
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by namespace resolution and the scan pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// The current namespace or cluster configuration could not be determined
    #[error("failed to determine cluster configuration: {message}")]
    Config { message: String },

    /// Listing pods against the cluster failed
    #[error("failed to list pods: {source}")]
    Query {
        #[source]
        source: BoxError,
    },

    /// A terminated container has no matching declared container in its pod
    #[error("unable to retrieve pod spec index for {container} in pod {pod}")]
    NotFound { container: String, pod: String },

    /// The caller asked to sort on a field that is not supported
    #[error("unsupported sort field '{field}', supported fields: time")]
    UnsupportedSortField { field: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn query(source: impl Into<BoxError>) -> Self {
        Self::Query {
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_adds_context() {
        let err = Error::query("connection refused");
        assert_eq!(err.to_string(), "failed to list pods: connection refused");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_not_found_names_container_and_pod() {
        let err = Error::NotFound {
            container: "sidecar".into(),
            pod: "web-0".into(),
        };
        assert_eq!(
            err.to_string(),
            "unable to retrieve pod spec index for sidecar in pod web-0"
        );
    }
}
