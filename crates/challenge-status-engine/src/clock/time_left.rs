use chrono::{DateTime, Utc};

use challenge_status_core::types::{DurationParts, PhaseKind, TimeLeft};

pub const STALLED_TIME_LEFT_MSG: &str = "Challenge is currently on hold";
pub const FINAL_FIX_TIME_LEFT_MSG: &str = "Winner is working on fixes";

/// Describe the time remaining until `target`, or how late it is.
///
/// Stalled (or unnamed) and Final Fix phases report a fixed message and are
/// never late. Every other phase counts down; an absent `target` counts as
/// zero distance, giving "0min 0s to go".
pub fn time_left(target: Option<DateTime<Utc>>, phase_name: &str, now: DateTime<Utc>) -> TimeLeft {
    match PhaseKind::from_name(phase_name) {
        PhaseKind::Stalled => fixed(STALLED_TIME_LEFT_MSG),
        PhaseKind::FinalFix => fixed(FINAL_FIX_TIME_LEFT_MSG),
        _ => {
            let delta = target.map(|t| (t - now).num_milliseconds()).unwrap_or(0);
            let late = delta < 0;
            let remaining = DurationParts::from_millis(delta.unsigned_abs());
            let text = if late {
                format!("Late by {remaining}")
            } else {
                format!("{remaining} to go")
            };
            TimeLeft {
                late,
                text,
                remaining: Some(remaining),
            }
        }
    }
}

fn fixed(msg: &str) -> TimeLeft {
    TimeLeft {
        late: false,
        text: msg.to_string(),
        remaining: None,
    }
}
