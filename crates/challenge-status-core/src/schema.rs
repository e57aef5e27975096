use anyhow::{Context, Result};
use jsonschema::Validator;
use serde_json::Value;

use crate::challenge::ChallengeSummary;
use crate::errors::{CheckIssue, CheckReport};
use crate::types::ChallengeStatus;

const SCHEMA: &str = include_str!("../schema/challenge.schema.json");

/// Compile the embedded challenge record schema.
pub fn validator() -> Result<Validator> {
    let schema: Value = serde_json::from_str(SCHEMA).context("embedded schema is invalid JSON")?;
    Validator::new(&schema).map_err(|e| anyhow::anyhow!("schema compilation failed: {e}"))
}

/// Full check producing structured report (for `cstat check --json`).
pub fn check(data: &Value, file: &str, strict: bool) -> CheckReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if let Ok(v) = validator() {
        for error in v.iter_errors(data) {
            let path = error.instance_path.to_string();
            errors.push(CheckIssue {
                code: "E001".to_string(),
                check: "schema".to_string(),
                message: error.to_string(),
                path: Some(if path.is_empty() {
                    "$(root)".to_string()
                } else {
                    format!("${path}")
                }),
            });
        }
    }

    // Lints only make sense on a record that decodes
    match serde_json::from_value::<ChallengeSummary>(data.clone()) {
        Ok(challenge) => lint_checks(&challenge, &mut warnings),
        Err(e) if errors.is_empty() => errors.push(CheckIssue {
            code: "E002".to_string(),
            check: "decode".to_string(),
            message: e.to_string(),
            path: None,
        }),
        Err(_) => {}
    }

    let pass = errors.is_empty() && (!strict || warnings.is_empty());
    CheckReport {
        file: file.to_string(),
        pass,
        errors,
        warnings,
    }
}

fn lint_checks(c: &ChallengeSummary, warnings: &mut Vec<CheckIssue>) {
    if let (Some(checkpoint), Some(submission)) =
        (c.checkpoint_submission_end_date, c.submission_end_date)
    {
        if checkpoint > submission {
            warnings.push(warn(
                "W001",
                "checkpoint ends after submission",
                "$/checkpointSubmissionEndDate",
            ));
        }
    }

    if let (Some(start), Some(end)) = (c.registration_start_date, c.registration_end_date) {
        if end < start {
            warnings.push(warn(
                "W002",
                "registration ends before it starts",
                "$/registrationEndDate",
            ));
        }
    }

    if c.status == ChallengeStatus::Active && c.current_phases.is_empty() {
        warnings.push(warn(
            "W003",
            "ACTIVE challenge has no current phase (shown as Stalled)",
            "$/currentPhases",
        ));
    }

    let has_winners = c.winners.as_ref().is_some_and(|w| !w.is_empty());
    if has_winners && c.status != ChallengeStatus::Completed {
        warnings.push(warn(
            "W004",
            "winners listed on a challenge that is not COMPLETED",
            "$/winners",
        ));
    }
}

fn warn(code: &str, message: &str, path: &str) -> CheckIssue {
    CheckIssue {
        code: code.to_string(),
        check: "lint".to_string(),
        message: message.to_string(),
        path: Some(path.to_string()),
    }
}
