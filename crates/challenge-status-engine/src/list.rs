use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use challenge_status_core::challenge::{load_challenge, ChallengeSummary};
use challenge_status_core::types::ChallengeStatus;

use crate::clock::{phase_message, resolve_phase, time_left};

/// Summary row for a single challenge file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeRow {
    pub file: String,
    pub id: String,
    pub status: String,
    pub phase: String,
    pub time_left: String,
}

/// Scan a directory for .json files and produce summary rows.
///
/// Files that fail to load are reported on stderr and skipped.
pub fn scan_dir(dir: &str, now: DateTime<Utc>) -> Result<Vec<ChallengeRow>> {
    let entries = std::fs::read_dir(dir).with_context(|| format!("cannot read directory {dir}"))?;

    let mut paths: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .map(|e| e.path())
        .collect();
    paths.sort();

    let mut rows = Vec::new();
    for path in paths {
        match load_challenge(&path.to_string_lossy()) {
            Ok(challenge) => rows.push(row(&path, &challenge, now)),
            Err(e) => eprintln!("  skip {}: {e}", path.display()),
        }
    }
    Ok(rows)
}

fn row(path: &Path, c: &ChallengeSummary, now: DateTime<Utc>) -> ChallengeRow {
    let file = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();

    let (phase, left) = if c.status == ChallengeStatus::Completed {
        ("-".to_string(), "-".to_string())
    } else if c.status == ChallengeStatus::Active && !c.current_phases.is_empty() {
        let d = resolve_phase(c, now);
        let left = time_left(d.current_phase_end_date, &d.current_phase_name, now).text;
        (d.current_phase_name, left)
    } else {
        (phase_message(c, now), "-".to_string())
    };

    let status = if c.status.as_str().is_empty() {
        "-".to_string()
    } else {
        c.status.to_string()
    };

    ChallengeRow {
        file,
        id: c.id_string(),
        status,
        phase,
        time_left: left,
    }
}

/// Print rows as an aligned table to stdout.
pub fn print_table(rows: &[ChallengeRow]) {
    if rows.is_empty() {
        println!("(no challenges found)");
        return;
    }
    let w_file = rows.iter().map(|r| r.file.len()).max().unwrap_or(4).max(4);
    let w_id = rows.iter().map(|r| r.id.len()).max().unwrap_or(2).max(2);
    let w_status = rows.iter().map(|r| r.status.len()).max().unwrap_or(6).max(6);
    let w_phase = rows.iter().map(|r| r.phase.len()).max().unwrap_or(5).max(5);

    println!(
        "{:<w_file$}  {:<w_id$}  {:<w_status$}  {:<w_phase$}  TIME LEFT",
        "FILE", "ID", "STATUS", "PHASE"
    );
    println!(
        "{:<w_file$}  {:<w_id$}  {:<w_status$}  {:<w_phase$}  ---------",
        "-".repeat(w_file),
        "-".repeat(w_id),
        "-".repeat(w_status),
        "-".repeat(w_phase)
    );
    for r in rows {
        println!(
            "{:<w_file$}  {:<w_id$}  {:<w_status$}  {:<w_phase$}  {}",
            r.file, r.id, r.status, r.phase, r.time_left
        );
    }
}
