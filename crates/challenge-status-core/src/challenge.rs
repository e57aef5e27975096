use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::RecordError;
use crate::types::{ChallengeStatus, PhaseKind};

/// One stage of a challenge lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengePhase {
    #[serde(default)]
    pub phase_type: String,
    #[serde(default)]
    pub phase_status: String,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_end_time: Option<DateTime<Utc>>,
}

impl ChallengePhase {
    pub fn kind(&self) -> PhaseKind {
        PhaseKind::from_name(&self.phase_type)
    }

    pub fn is_open(&self) -> bool {
        self.phase_status == "Open"
    }
}

/// A participant with a placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Winner {
    pub handle: String,
    #[serde(default)]
    pub placement: u32,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Winner {
    pub fn is_final(&self) -> bool {
        self.kind == "final"
    }
}

/// The subset of a listing record consumed by the status card.
///
/// Everything except `id` is optional on input. Absent or null collections,
/// counts and status decode as their defaults; absent, empty or unparseable
/// dates decode as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSummary {
    pub id: serde_json::Value,

    #[serde(default)]
    pub track: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ChallengeStatus,

    #[serde(default, deserialize_with = "null_as_default")]
    pub current_phases: Vec<ChallengePhase>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub all_phases: Vec<ChallengePhase>,

    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_start_date: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub registration_end_date: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub submission_end_date: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub checkpoint_submission_end_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub num_registrants: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub num_submissions: u64,

    /// `None` means the listing carried no winners field at all, which the
    /// card renders differently from an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winners: Option<Vec<Winner>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forum_id: Option<serde_json::Value>,

    #[serde(default)]
    pub my_challenge: bool,
}

impl ChallengeSummary {
    /// The authoritative current phase, if any.
    pub fn current_phase(&self) -> Option<&ChallengePhase> {
        self.current_phases.first()
    }

    /// Registration phase as listed in `allPhases`.
    pub fn registration_phase(&self) -> Option<&ChallengePhase> {
        self.all_phases
            .iter()
            .find(|p| p.kind() == PhaseKind::Registration)
    }

    /// `id` rendered the way it appears in URLs (numbers and strings alike).
    pub fn id_string(&self) -> String {
        value_to_plain(&self.id)
    }

    pub fn forum_id_string(&self) -> Option<String> {
        self.forum_id.as_ref().map(value_to_plain)
    }
}

fn value_to_plain(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc)))
}

/// Parse a challenge record from a JSON string.
pub fn parse_challenge(content: &str, source: &str) -> Result<ChallengeSummary, RecordError> {
    serde_json::from_str(content).map_err(|e| RecordError::Parse {
        path: source.to_string(),
        source: e,
    })
}

/// Load a challenge record from a file.
pub fn load_challenge(path: &str) -> Result<ChallengeSummary, RecordError> {
    let content = std::fs::read_to_string(Path::new(path)).map_err(|e| RecordError::Read {
        path: path.to_string(),
        source: e,
    })?;
    parse_challenge(&content, path)
}
