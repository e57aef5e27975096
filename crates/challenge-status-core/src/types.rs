use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const SECOND_MS: u64 = 1000;
pub const MINUTE_MS: u64 = 60 * SECOND_MS;
pub const HOUR_MS: u64 = 60 * MINUTE_MS;
pub const DAY_MS: u64 = 24 * HOUR_MS;

/// Listing status of a challenge. Unknown values are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeStatus {
    Active,
    Completed,
    Draft,
    Other(String),
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ChallengeStatus::Active => "ACTIVE",
            ChallengeStatus::Completed => "COMPLETED",
            ChallengeStatus::Draft => "DRAFT",
            ChallengeStatus::Other(s) => s,
        }
    }
}

impl Default for ChallengeStatus {
    fn default() -> Self {
        ChallengeStatus::Other(String::new())
    }
}

impl From<&str> for ChallengeStatus {
    fn from(s: &str) -> Self {
        match s {
            "ACTIVE" => ChallengeStatus::Active,
            "COMPLETED" => ChallengeStatus::Completed,
            "DRAFT" => ChallengeStatus::Draft,
            other => ChallengeStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChallengeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChallengeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChallengeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ChallengeStatus::from(s.as_str()))
    }
}

/// Phase names the phase clock treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Registration,
    Submission,
    Checkpoint,
    FinalFix,
    /// Empty name or the literal "Stalled".
    Stalled,
    Other,
}

impl PhaseKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Registration" => PhaseKind::Registration,
            "Submission" => PhaseKind::Submission,
            "Checkpoint" => PhaseKind::Checkpoint,
            "Final Fix" => PhaseKind::FinalFix,
            "" | "Stalled" => PhaseKind::Stalled,
            _ => PhaseKind::Other,
        }
    }
}

/// Noun used in count descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountNoun {
    Registrant,
    Submission,
}

impl CountNoun {
    pub fn as_str(self) -> &'static str {
        match self {
            CountNoun::Registrant => "registrant",
            CountNoun::Submission => "submission",
        }
    }
}

impl std::str::FromStr for CountNoun {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('s') {
            "registrant" => Ok(CountNoun::Registrant),
            "submission" => Ok(CountNoun::Submission),
            _ => Err(format!("unknown noun \"{s}\" (use: registrant, submission)")),
        }
    }
}

/// Which pair of units a remaining duration is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPattern {
    DaysHours,
    HoursMinutes,
    MinutesSeconds,
}

impl DurationPattern {
    /// Strictly more than a day shows days, strictly more than an hour shows hours.
    pub fn for_millis(ms: u64) -> Self {
        if ms > DAY_MS {
            DurationPattern::DaysHours
        } else if ms > HOUR_MS {
            DurationPattern::HoursMinutes
        } else {
            DurationPattern::MinutesSeconds
        }
    }
}

/// Absolute distance to a deadline, broken into components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParts {
    pub total_millis: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub pattern: DurationPattern,
}

impl DurationParts {
    pub fn from_millis(ms: u64) -> Self {
        Self {
            total_millis: ms,
            days: ms / DAY_MS,
            hours: (ms % DAY_MS) / HOUR_MS,
            minutes: (ms % HOUR_MS) / MINUTE_MS,
            seconds: (ms % MINUTE_MS) / SECOND_MS,
            pattern: DurationPattern::for_millis(ms),
        }
    }

    pub fn zero() -> Self {
        Self::from_millis(0)
    }
}

/// Renders only the two units chosen by `pattern`; the leading unit absorbs
/// everything above it (e.g. exactly one day shows as "24h 0min").
impl fmt::Display for DurationParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pattern {
            DurationPattern::DaysHours => write!(f, "{}d {}h", self.days, self.hours),
            DurationPattern::HoursMinutes => {
                write!(f, "{}h {}min", self.total_millis / HOUR_MS, self.minutes)
            }
            DurationPattern::MinutesSeconds => {
                write!(f, "{}min {}s", self.total_millis / MINUTE_MS, self.seconds)
            }
        }
    }
}

/// Current phase label and when it ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDerivation {
    pub current_phase_name: String,
    pub current_phase_end_date: Option<DateTime<Utc>>,
}

/// Human-readable remaining (or overdue) time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeLeft {
    pub late: bool,
    pub text: String,
    /// Absent for phases that report a fixed message instead of a countdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<DurationParts>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressColor {
    Green,
    Gray,
}
