use chrono::{DateTime, Utc};

use challenge_status_core::challenge::ChallengeSummary;
use challenge_status_core::types::{ChallengeStatus, PhaseDerivation, PhaseKind};

use super::time_left::time_left;

pub const STALLED_MSG: &str = "Stalled";
pub const DRAFT_MSG: &str = "In Draft";

/// Resolve the phase label shown on the card and when it ends.
///
/// | current phase            | checkpoint still open | result                  |
/// |--------------------------|-----------------------|-------------------------|
/// | Registration, Submission | yes                   | Checkpoint / checkpoint |
/// | Registration, Submission | no or unset           | Submission / submission |
/// | anything else            | -                     | name / scheduled end    |
pub fn resolve_phase(challenge: &ChallengeSummary, now: DateTime<Utc>) -> PhaseDerivation {
    let current = challenge.current_phase();
    let name = current.map(|p| p.phase_type.as_str()).unwrap_or("");

    match PhaseKind::from_name(name) {
        PhaseKind::Registration | PhaseKind::Submission => {
            let checkpoint = challenge
                .checkpoint_submission_end_date
                .filter(|end| !time_left(Some(*end), "Checkpoint", now).late);
            match checkpoint {
                Some(end) => PhaseDerivation {
                    current_phase_name: "Checkpoint".to_string(),
                    current_phase_end_date: Some(end),
                },
                None => PhaseDerivation {
                    current_phase_name: "Submission".to_string(),
                    current_phase_end_date: challenge.submission_end_date,
                },
            }
        }
        _ => PhaseDerivation {
            current_phase_name: name.to_string(),
            current_phase_end_date: current.and_then(|p| p.scheduled_end_time),
        },
    }
}

/// Headline for an active card: the resolved phase, "In Draft", or "Stalled".
pub fn phase_message(challenge: &ChallengeSummary, now: DateTime<Utc>) -> String {
    if !challenge.current_phases.is_empty() {
        resolve_phase(challenge, now).current_phase_name
    } else if challenge.status == ChallengeStatus::Draft {
        DRAFT_MSG.to_string()
    } else {
        STALLED_MSG.to_string()
    }
}
