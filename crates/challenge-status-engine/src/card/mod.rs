//! Status card view model: everything a renderer needs, already derived.

pub mod leaderboard;
pub mod links;

use chrono::{DateTime, Utc};
use serde::Serialize;

use challenge_status_core::challenge::ChallengeSummary;
use challenge_status_core::config::StatusConfig;
use challenge_status_core::errors::Anomaly;
use challenge_status_core::types::{ChallengeStatus, CountNoun, PhaseKind, ProgressColor, TimeLeft};

use crate::clock::{describe_count, percent_complete_between, phase_message, resolve_phase, time_left};

use self::leaderboard::{build_leaderboard, Leaderboard};
use self::links::{active_count_href, details_href, forum_href, LongContestModule};

/// Caller-supplied rendering context.
#[derive(Debug, Clone, Default)]
pub struct CardOptions {
    pub detail_link: String,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCard {
    /// "completed" for finished challenges, empty otherwise.
    pub status_class: String,
    pub body: CardBody,
    /// Sentinels applied while deriving this card.
    pub anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CardBody {
    Completed {
        leaderboard: Leaderboard,
        registrants: CountBadge,
        submissions: CountBadge,
        #[serde(skip_serializing_if = "Option::is_none")]
        forum_link: Option<String>,
    },
    Active {
        phase_message: String,
        registration_open: bool,
        registrants: CountBadge,
        submissions: CountBadge,
        #[serde(skip_serializing_if = "Option::is_none")]
        forum_link: Option<String>,
        progress: ProgressBar,
        #[serde(skip_serializing_if = "Option::is_none")]
        register: Option<RegisterCta>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountBadge {
    pub count: u64,
    pub tooltip: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressBar {
    pub color: ProgressColor,
    /// Percent elapsed; unclamped, renderers clamp for display.
    pub value: f64,
    pub late: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_left: Option<String>,
}

impl ProgressBar {
    fn idle() -> Self {
        Self {
            color: ProgressColor::Gray,
            value: 100.0,
            late: false,
            time_left: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterCta {
    pub note: String,
    pub label: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Derive the full status card for `challenge` at `now`.
pub fn build_card(
    challenge: &ChallengeSummary,
    options: &CardOptions,
    config: &StatusConfig,
    now: DateTime<Utc>,
) -> StatusCard {
    let mut anomalies = Vec::new();

    if challenge.status == ChallengeStatus::Completed {
        let href = details_href(challenge, &config.urls);
        return StatusCard {
            status_class: "completed".to_string(),
            body: CardBody::Completed {
                leaderboard: build_leaderboard(
                    challenge.winners.as_deref(),
                    &options.detail_link,
                    options.open_in_new_tab,
                ),
                registrants: badge(challenge.num_registrants, CountNoun::Registrant, href.clone()),
                submissions: badge(challenge.num_submissions, CountNoun::Submission, href),
                forum_link: forum_href(challenge, &config.urls),
            },
            anomalies,
        };
    }

    let registration_open = challenge
        .registration_phase()
        .is_some_and(|p| p.is_open());

    let progress = if challenge.status == ChallengeStatus::Active
        && !challenge.current_phases.is_empty()
    {
        active_progress(challenge, now, &mut anomalies)
    } else {
        ProgressBar::idle()
    };

    let register = registration_open.then(|| register_cta(challenge, options, now, &mut anomalies));

    StatusCard {
        status_class: String::new(),
        body: CardBody::Active {
            phase_message: phase_message(challenge, now),
            registration_open,
            registrants: badge(
                challenge.num_registrants,
                CountNoun::Registrant,
                active_count_href(challenge, &config.urls, LongContestModule::ViewRegistrants),
            ),
            submissions: badge(
                challenge.num_submissions,
                CountNoun::Submission,
                active_count_href(challenge, &config.urls, LongContestModule::ViewStandings),
            ),
            forum_link: forum_href(challenge, &config.urls),
            progress,
            register,
        },
        anomalies,
    }
}

fn badge(count: u64, noun: CountNoun, href: String) -> CountBadge {
    CountBadge {
        count,
        tooltip: describe_count(count, noun),
        href,
    }
}

fn active_progress(
    challenge: &ChallengeSummary,
    now: DateTime<Utc>,
    anomalies: &mut Vec<Anomaly>,
) -> ProgressBar {
    let derivation = resolve_phase(challenge, now);
    let name = derivation.current_phase_name.as_str();
    let start = challenge.registration_start_date;
    let end = derivation.current_phase_end_date;

    if start.is_none() {
        note_missing(anomalies, "registrationStartDate");
    }
    if end.is_none() {
        note_missing(anomalies, "currentPhaseEndDate");
    }
    if start.is_some() && start == end {
        anomalies.push(Anomaly::DegenerateWindow);
    }

    let left = countdown(end, name, "currentPhaseEndDate", now, anomalies);
    ProgressBar {
        color: ProgressColor::Green,
        value: percent_complete_between(start, end, now),
        late: left.late,
        time_left: Some(left.text),
    }
}

fn register_cta(
    challenge: &ChallengeSummary,
    options: &CardOptions,
    now: DateTime<Utc>,
    anomalies: &mut Vec<Anomaly>,
) -> RegisterCta {
    let (deadline, field) = match challenge.registration_end_date {
        Some(d) => (Some(d), "registrationEndDate"),
        None => (challenge.submission_end_date, "submissionEndDate"),
    };
    let phase = challenge
        .current_phase()
        .map(|p| p.phase_type.as_str())
        .unwrap_or("");
    let left = countdown(deadline, phase, field, now, anomalies);

    // A pending countdown reads "<duration> to register"; fixed messages and
    // overdue deadlines are shown whole.
    let note = match left.remaining {
        Some(parts) if !left.late => parts.to_string(),
        _ => left.text,
    };

    RegisterCta {
        note,
        label: "to register".to_string(),
        href: options.detail_link.clone(),
        target: options.open_in_new_tab.then(|| "_blank".to_string()),
    }
}

/// `time_left` plus anomaly bookkeeping for the inputs it was given.
fn countdown(
    target: Option<DateTime<Utc>>,
    phase: &str,
    field: &str,
    now: DateTime<Utc>,
    anomalies: &mut Vec<Anomaly>,
) -> TimeLeft {
    let left = time_left(target, phase, now);
    if left.remaining.is_some() {
        if target.is_none() {
            note_missing(anomalies, field);
        }
        if PhaseKind::from_name(phase) == PhaseKind::Other {
            let anomaly = Anomaly::UnknownPhaseName {
                name: phase.to_string(),
            };
            if !anomalies.contains(&anomaly) {
                anomalies.push(anomaly);
            }
        }
    }
    left
}

fn note_missing(anomalies: &mut Vec<Anomaly>, field: &str) {
    let anomaly = Anomaly::MissingTimestamp {
        field: field.to_string(),
    };
    if !anomalies.contains(&anomaly) {
        anomalies.push(anomaly);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use challenge_status_core::challenge::parse_challenge;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-19T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn record(v: serde_json::Value) -> ChallengeSummary {
        parse_challenge(&v.to_string(), "inline").unwrap()
    }

    fn opts() -> CardOptions {
        CardOptions {
            detail_link: "/challenges/30051234?lang=en".into(),
            open_in_new_tab: false,
        }
    }

    fn active() -> serde_json::Value {
        json!({
            "id": 30051234,
            "track": "DEVELOP",
            "status": "ACTIVE",
            "currentPhases": [{"phaseType": "Submission", "phaseStatus": "Open"}],
            "allPhases": [
                {"phaseType": "Registration", "phaseStatus": "Open"},
                {"phaseType": "Submission", "phaseStatus": "Open"}
            ],
            "registrationStartDate": "2026-10-17T08:00:00Z",
            "registrationEndDate": "2026-10-20T10:30:00Z",
            "submissionEndDate": "2026-10-21T08:00:00Z",
            "numRegistrants": 12,
            "numSubmissions": 1
        })
    }

    #[test]
    fn active_card_has_green_progress() {
        let card = build_card(&record(active()), &opts(), &StatusConfig::default(), now());
        assert_eq!(card.status_class, "");
        assert!(card.anomalies.is_empty(), "{:?}", card.anomalies);
        let CardBody::Active {
            phase_message,
            registration_open,
            progress,
            registrants,
            submissions,
            register,
            ..
        } = card.body
        else {
            panic!("expected active body");
        };
        assert_eq!(phase_message, "Submission");
        assert!(registration_open);
        assert_eq!(progress.color, ProgressColor::Green);
        assert_eq!(progress.value, 50.0);
        assert!(!progress.late);
        assert_eq!(progress.time_left.as_deref(), Some("2d 0h to go"));
        assert_eq!(registrants.tooltip, "12 total registrants");
        assert_eq!(submissions.tooltip, "1 total submission");
        let register = register.unwrap();
        assert_eq!(register.note, "1d 2h");
        assert_eq!(register.label, "to register");
        assert_eq!(register.href, "/challenges/30051234?lang=en");
        assert!(register.target.is_none());
    }

    #[test]
    fn completed_card_has_leaderboard() {
        let mut v = active();
        v["status"] = json!("COMPLETED");
        v["winners"] = json!([{"handle": "tourist", "placement": 1, "type": "final"}]);
        let card = build_card(&record(v), &opts(), &StatusConfig::default(), now());
        assert_eq!(card.status_class, "completed");
        let CardBody::Completed {
            leaderboard,
            registrants,
            ..
        } = card.body
        else {
            panic!("expected completed body");
        };
        assert!(matches!(leaderboard, Leaderboard::Winners { ref entries } if entries.len() == 1));
        assert_eq!(
            registrants.href,
            "https://www.topcoder.com/challenge-details/30051234/?type=develop#viewRegistrant"
        );
    }

    #[test]
    fn draft_without_phases_is_gray() {
        let v = json!({"id": 5, "status": "DRAFT"});
        let card = build_card(&record(v), &opts(), &StatusConfig::default(), now());
        let CardBody::Active {
            phase_message,
            progress,
            register,
            ..
        } = card.body
        else {
            panic!("expected active body");
        };
        assert_eq!(phase_message, "In Draft");
        assert_eq!(progress, ProgressBar::idle());
        assert!(register.is_none());
    }

    #[test]
    fn late_register_note_keeps_full_text() {
        let mut v = active();
        v["registrationEndDate"] = json!("2026-10-19T06:30:00Z");
        let card = build_card(&record(v), &opts(), &StatusConfig::default(), now());
        let CardBody::Active { register, .. } = card.body else {
            panic!("expected active body");
        };
        assert_eq!(register.unwrap().note, "Late by 1h 30min");
    }

    #[test]
    fn stalled_register_note_is_not_truncated() {
        let mut v = active();
        v["currentPhases"] = json!([]);
        let card = build_card(&record(v), &opts(), &StatusConfig::default(), now());
        let CardBody::Active {
            phase_message,
            register,
            progress,
            ..
        } = card.body
        else {
            panic!("expected active body");
        };
        assert_eq!(phase_message, "Stalled");
        assert_eq!(register.unwrap().note, "Challenge is currently on hold");
        assert_eq!(progress.color, ProgressColor::Gray);
    }

    #[test]
    fn new_tab_sets_target() {
        let options = CardOptions {
            detail_link: "/c".into(),
            open_in_new_tab: true,
        };
        let card = build_card(&record(active()), &options, &StatusConfig::default(), now());
        let CardBody::Active { register, .. } = card.body else {
            panic!("expected active body");
        };
        assert_eq!(register.unwrap().target.as_deref(), Some("_blank"));
    }

    #[test]
    fn missing_dates_are_reported() {
        let v = json!({
            "id": 1,
            "status": "ACTIVE",
            "currentPhases": [{"phaseType": "Review", "phaseStatus": "Open"}]
        });
        let card = build_card(&record(v), &opts(), &StatusConfig::default(), now());
        assert_eq!(
            card.anomalies,
            vec![
                Anomaly::MissingTimestamp {
                    field: "registrationStartDate".into()
                },
                Anomaly::MissingTimestamp {
                    field: "currentPhaseEndDate".into()
                },
                Anomaly::UnknownPhaseName {
                    name: "Review".into()
                },
            ]
        );
        let CardBody::Active { progress, .. } = card.body else {
            panic!("expected active body");
        };
        assert_eq!(progress.value, 0.0);
        assert_eq!(progress.time_left.as_deref(), Some("0min 0s to go"));
    }

    #[test]
    fn degenerate_window_is_reported() {
        let v = json!({
            "id": 1,
            "status": "ACTIVE",
            "currentPhases": [{"phaseType": "Final Fix", "phaseStatus": "Open",
                               "scheduledEndTime": "2026-10-18T00:00:00Z"}],
            "registrationStartDate": "2026-10-18T00:00:00Z"
        });
        let card = build_card(&record(v), &opts(), &StatusConfig::default(), now());
        assert_eq!(card.anomalies, vec![Anomaly::DegenerateWindow]);
        let CardBody::Active { progress, .. } = card.body else {
            panic!("expected active body");
        };
        assert_eq!(progress.value, 100.0);
        assert_eq!(progress.time_left.as_deref(), Some("Winner is working on fixes"));
    }

    #[test]
    fn forum_link_needs_own_challenge_and_forum_id() {
        let forum_of = |v: serde_json::Value| {
            match build_card(&record(v), &opts(), &StatusConfig::default(), now()).body {
                CardBody::Active { forum_link, .. } | CardBody::Completed { forum_link, .. } => {
                    forum_link
                }
            }
        };

        let mut v = active();
        v["myChallenge"] = json!(true);
        v["forumId"] = json!(655);
        assert_eq!(
            forum_of(v).as_deref(),
            Some("https://apps.topcoder.com/forums/?module=Category&categoryID=655")
        );

        let mut v = active();
        v["myChallenge"] = json!(true);
        assert!(forum_of(v).is_none());

        let mut v = active();
        v["myChallenge"] = json!(true);
        v["forumId"] = json!("");
        assert!(forum_of(v).is_none());

        let mut v = active();
        v["status"] = json!("COMPLETED");
        v["myChallenge"] = json!(true);
        v["forumId"] = json!(null);
        assert!(forum_of(v).is_none());
    }

    #[test]
    fn null_and_blank_fields_degrade_to_sentinels() {
        let mut v = active();
        v["registrationStartDate"] = json!("");
        v["checkpointSubmissionEndDate"] = json!("");
        v["numSubmissions"] = json!(null);
        v["allPhases"] = json!(null);
        let card = build_card(&record(v), &opts(), &StatusConfig::default(), now());
        assert_eq!(
            card.anomalies,
            vec![Anomaly::MissingTimestamp {
                field: "registrationStartDate".into()
            }]
        );
        let CardBody::Active {
            phase_message,
            registration_open,
            submissions,
            progress,
            register,
            ..
        } = card.body
        else {
            panic!("expected active body");
        };
        assert_eq!(phase_message, "Submission");
        assert!(!registration_open);
        assert!(register.is_none());
        assert_eq!(submissions.tooltip, "No submissions");
        assert_eq!(progress.value, 0.0);
        assert_eq!(progress.time_left.as_deref(), Some("2d 0h to go"));
    }

    #[test]
    fn serializes_with_state_tag() {
        let card = build_card(&record(active()), &opts(), &StatusConfig::default(), now());
        let v = serde_json::to_value(&card).unwrap();
        assert_eq!(v["body"]["state"], "active");
        assert_eq!(v["body"]["progress"]["color"], "green");
        assert!(v["body"].get("forum_link").is_none());
    }

    #[test]
    fn idempotent() {
        let c = record(active());
        let a = build_card(&c, &opts(), &StatusConfig::default(), now());
        let b = build_card(&c, &opts(), &StatusConfig::default(), now());
        assert_eq!(a, b);
    }
}
