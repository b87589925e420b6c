//! Core data models for the OOM report

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Error;

/// Identity of the pod a terminated container belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PodRef {
    pub name: String,
    pub namespace: String,
}

/// Memory request and limit of the terminated container, in display form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    pub request: String,
    pub limit: String,
}

/// A container whose last termination was an OOM kill
#[derive(Debug, Clone, Serialize)]
pub struct TerminationRecord {
    pub pod: PodRef,
    /// Name of the terminated container, relevant for multi-container pods
    pub container_name: String,
    pub memory: MemoryInfo,
    /// Termination reason reported by the kubelet, usually "OOMKilled"
    pub reason: Option<String>,
    /// Comparable termination time, used for ordering
    pub terminated_at: Option<DateTime<Utc>>,
    /// When the container was terminated
    pub terminated_time: String,
    /// When the container was started before the termination
    pub start_time: String,
}

/// OOM-killed containers, in discovery order unless explicitly sorted
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TerminatedContainers(Vec<TerminationRecord>);

impl TerminatedContainers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TerminationRecord) {
        self.0.push(record);
    }

    /// Sort in ascending termination order, so the first OOMKilled container
    /// is at the top and the most recent one at the end.
    ///
    /// The sort is stable: records with equal timestamps keep their relative
    /// order. Records without a termination time sort first.
    pub fn sort_by_termination_time(&mut self) {
        self.0.sort_by_key(|record| record.terminated_at);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TerminationRecord> {
        self.0.iter()
    }
}

impl From<Vec<TerminationRecord>> for TerminatedContainers {
    fn from(records: Vec<TerminationRecord>) -> Self {
        Self(records)
    }
}

impl<'a> IntoIterator for &'a TerminatedContainers {
    type Item = &'a TerminationRecord;
    type IntoIter = std::slice::Iter<'a, TerminationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Field a report can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    TerminationTime,
}

impl SortField {
    pub fn apply(self, containers: &mut TerminatedContainers) {
        match self {
            SortField::TerminationTime => containers.sort_by_termination_time(),
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "termination-time" => Ok(SortField::TerminationTime),
            _ => Err(Error::UnsupportedSortField {
                field: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(name: &str, terminated_at: Option<DateTime<Utc>>) -> TerminationRecord {
        TerminationRecord {
            pod: PodRef {
                name: format!("{name}-pod"),
                namespace: "default".into(),
            },
            container_name: name.into(),
            memory: MemoryInfo {
                request: "64Mi".into(),
                limit: "128Mi".into(),
            },
            reason: Some("OOMKilled".into()),
            terminated_at,
            terminated_time: String::new(),
            start_time: String::new(),
        }
    }

    fn names(containers: &TerminatedContainers) -> Vec<&str> {
        containers
            .iter()
            .map(|r| r.container_name.as_str())
            .collect()
    }

    #[test]
    fn test_sort_by_termination_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

        // Not in ascending order
        let mut containers = TerminatedContainers::from(vec![
            record("1 month", Some(now + Duration::days(30))),
            record("now", Some(now)),
            record("2 days", Some(now + Duration::days(2))),
            record("1 day", Some(now + Duration::days(1))),
        ]);

        containers.sort_by_termination_time();

        assert_eq!(names(&containers), vec!["now", "1 day", "2 days", "1 month"]);
        let times: Vec<_> = containers.iter().map(|r| r.terminated_at).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut containers = TerminatedContainers::from(vec![
            record("b", Some(t + Duration::minutes(5))),
            record("first-tie", Some(t)),
            record("second-tie", Some(t)),
            record("unknown", None),
        ]);

        containers.sort_by_termination_time();
        let once = names(&containers)
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        assert_eq!(once, vec!["unknown", "first-tie", "second-tie", "b"]);

        containers.sort_by_termination_time();
        assert_eq!(names(&containers), once);
    }

    #[test]
    fn test_default_order_is_insertion_order() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut containers = TerminatedContainers::new();
        containers.push(record("late", Some(t + Duration::hours(1))));
        containers.push(record("early", Some(t)));

        assert_eq!(names(&containers), vec!["late", "early"]);
    }

    #[test]
    fn test_sort_field_parsing() {
        assert_eq!("time".parse::<SortField>().unwrap(), SortField::TerminationTime);
        assert_eq!(
            "Termination-Time".parse::<SortField>().unwrap(),
            SortField::TerminationTime
        );

        let err = "memory".parse::<SortField>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedSortField { ref field } if field == "memory"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let containers = TerminatedContainers::from(vec![record("app", None)]);
        let json = serde_json::to_value(&containers).unwrap();

        let items = json.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["container_name"], "app");
        assert_eq!(items[0]["memory"]["limit"], "128Mi");
        assert!(items[0]["terminated_at"].is_null());
    }
}
