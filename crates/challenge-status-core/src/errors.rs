use std::fmt;

use serde::Serialize;

/// Non-fatal input defect for which a sentinel value was substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// A deadline or window bound was absent.
    MissingTimestamp { field: String },
    /// Progress window with identical start and end.
    DegenerateWindow,
    /// Phase name outside the known set; generic countdown applied.
    UnknownPhaseName { name: String },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MissingTimestamp { field } => write!(f, "missing timestamp: {field}"),
            Anomaly::DegenerateWindow => write!(f, "degenerate progress window"),
            Anomaly::UnknownPhaseName { name } => write!(f, "unknown phase name: {name}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("cannot read challenge {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: invalid challenge JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: invalid config JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Structured check result for `cstat check --json`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckReport {
    pub file: String,
    pub pass: bool,
    pub errors: Vec<CheckIssue>,
    pub warnings: Vec<CheckIssue>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CheckIssue {
    pub code: String,
    pub check: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anomaly_serializes_tagged() {
        let a = Anomaly::MissingTimestamp {
            field: "submissionEndDate".into(),
        };
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["kind"], "missing_timestamp");
        assert_eq!(v["field"], "submissionEndDate");
        assert_eq!(
            serde_json::to_value(Anomaly::DegenerateWindow).unwrap()["kind"],
            "degenerate_window"
        );
    }
}
