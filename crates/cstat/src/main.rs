#![forbid(unsafe_code)]

use std::fmt::{self, Write as _};
use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use challenge_status_core::challenge::{load_challenge, parse_challenge, ChallengeSummary};
use challenge_status_core::config::{load_config, StatusConfig, DEFAULT_CONFIG_PATH};
use challenge_status_core::traits::{Clock, FixedClock, SystemClock};
use challenge_status_core::types::CountNoun;
use challenge_status_engine::card::leaderboard::{Leaderboard, LeaderboardEntry};
use challenge_status_engine::card::{build_card, CardBody, CardOptions, CountBadge, StatusCard};
use challenge_status_engine::clock::{describe_count, percent_complete, resolve_phase, time_left};

#[derive(Parser)]
#[command(
    name = "cstat",
    version,
    about = "Challenge phase, countdown, and status card derivation. Unix-friendly."
)]
struct Cli {
    /// Evaluate at this instant (RFC 3339) instead of the system clock.
    #[arg(long, global = true)]
    now: Option<String>,

    /// Config file (default: .challenge-status/config.json if present).
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Resolve the current phase name and end date of a challenge.
    Phase {
        /// Path to challenge .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,
    },

    /// Describe time remaining until a deadline.
    TimeLeft {
        /// Phase name ("Stalled" and "Final Fix" report fixed messages).
        #[arg(long)]
        phase: String,

        /// Deadline (RFC 3339). Omitted means zero distance.
        #[arg(long)]
        target: Option<String>,
    },

    /// Percentage of a time window elapsed.
    Progress {
        /// Window start (RFC 3339).
        #[arg(long)]
        start: String,

        /// Window end (RFC 3339).
        #[arg(long)]
        end: String,
    },

    /// Describe a registrant or submission count.
    Count {
        /// The count.
        n: u64,

        /// registrant or submission.
        noun: String,
    },

    /// Derive the full status card for a challenge.
    Card {
        /// Path to challenge .json (or "-" / omit for stdin).
        #[arg(default_value = "-")]
        file: String,

        /// Link to the challenge details page.
        #[arg(long, default_value = "")]
        detail_link: String,

        /// Open links in a new tab.
        #[arg(long)]
        new_tab: bool,

        /// Output JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate a challenge record: schema + consistency lints.
    Check {
        /// Path to challenge .json file.
        file: String,

        /// Output structured JSON report.
        #[arg(long)]
        json: bool,

        /// Fail on warnings (not just errors).
        #[arg(long)]
        strict: bool,
    },

    /// Summarize challenge files in a directory as a table.
    List {
        /// Directory containing .json challenge files.
        #[arg(default_value = ".")]
        dir: String,
    },

    /// Write the default config to .challenge-status/config.json.
    Init {
        /// Overwrite an existing config.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let now = clock_for(cli.now.as_deref())?.now();

    match cli.cmd {
        Cmd::Phase { file } => cmd_phase(&file, now),

        Cmd::TimeLeft { phase, target } => cmd_time_left(&phase, target.as_deref(), now),

        Cmd::Progress { start, end } => cmd_progress(&start, &end, now),

        Cmd::Count { n, noun } => cmd_count(n, &noun),

        Cmd::Card {
            file,
            detail_link,
            new_tab,
            json,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let options = CardOptions {
                detail_link,
                open_in_new_tab: new_tab,
            };
            cmd_card(&file, &options, &config, json, now)
        }

        Cmd::Check { file, json, strict } => cmd_check(&file, json, strict),

        Cmd::List { dir } => cmd_list(&dir, now),

        Cmd::Init { force } => cmd_init(force),
    }
}

fn clock_for(now_flag: Option<&str>) -> Result<Box<dyn Clock>> {
    match now_flag {
        Some(s) => Ok(Box::new(FixedClock(parse_instant(s, "--now")?))),
        None => Ok(Box::new(SystemClock)),
    }
}

fn parse_instant(s: &str, what: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .with_context(|| format!("{what}: invalid RFC 3339 timestamp \"{s}\""))
}

fn read_challenge(file: &str) -> Result<ChallengeSummary> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(parse_challenge(&buf, "<stdin>")?)
    } else {
        Ok(load_challenge(file)?)
    }
}

fn cmd_phase(file: &str, now: DateTime<Utc>) -> Result<()> {
    let challenge = read_challenge(file)?;
    let derivation = resolve_phase(&challenge, now);
    println!("{}", serde_json::to_string_pretty(&derivation)?);
    Ok(())
}

fn cmd_time_left(phase: &str, target: Option<&str>, now: DateTime<Utc>) -> Result<()> {
    let target = target.map(|t| parse_instant(t, "--target")).transpose()?;
    let left = time_left(target, phase, now);
    println!("{}", serde_json::to_string_pretty(&left)?);
    Ok(())
}

fn cmd_progress(start: &str, end: &str, now: DateTime<Utc>) -> Result<()> {
    let start = parse_instant(start, "--start")?;
    let end = parse_instant(end, "--end")?;
    if start == end {
        eprintln!("  note: zero-length window");
    }
    println!("{:.2}", percent_complete(start, end, now));
    Ok(())
}

fn cmd_count(n: u64, noun: &str) -> Result<()> {
    let noun: CountNoun = noun.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    println!("{}", describe_count(n, noun));
    Ok(())
}

fn cmd_card(
    file: &str,
    options: &CardOptions,
    config: &StatusConfig,
    json_out: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let challenge = read_challenge(file)?;
    let card = build_card(&challenge, options, config, now);
    if json_out {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        print!("{}", render_summary(&card)?);
    }
    for anomaly in &card.anomalies {
        eprintln!("  note: {anomaly}");
    }
    Ok(())
}

/// Plain-text rendering of a card, one labelled line per element.
fn render_summary(card: &StatusCard) -> Result<String, fmt::Error> {
    let mut out = String::new();
    match &card.body {
        CardBody::Completed {
            leaderboard,
            registrants,
            submissions,
            forum_link,
        } => {
            writeln!(out, "  Status:       completed")?;
            match leaderboard {
                Leaderboard::Results { href } => {
                    writeln!(out, "  Winners:      (results) {href}")?;
                }
                Leaderboard::Winners { entries } if entries.is_empty() => {
                    writeln!(out, "  Winners:      (none)")?;
                }
                Leaderboard::Winners { entries } => {
                    let names: Vec<String> = entries
                        .iter()
                        .map(|e| match e {
                            LeaderboardEntry::Winner {
                                handle, position, ..
                            } => format!("#{position} {handle}"),
                            LeaderboardEntry::Overflow { handle, .. } => handle.clone(),
                        })
                        .collect();
                    writeln!(out, "  Winners:      {}", names.join(", "))?;
                }
            }
            write_badges(&mut out, registrants, submissions)?;
            if let Some(link) = forum_link {
                writeln!(out, "  Forum:        {link}")?;
            }
        }
        CardBody::Active {
            phase_message,
            registration_open,
            registrants,
            submissions,
            forum_link,
            progress,
            register,
        } => {
            writeln!(out, "  Status:       active")?;
            writeln!(out, "  Phase:        {phase_message}")?;
            let late = if progress.late { " LATE" } else { "" };
            match &progress.time_left {
                Some(left) => {
                    writeln!(
                        out,
                        "  Progress:     {:.2}%{late} ({left})",
                        progress.value
                    )?;
                }
                None => {
                    writeln!(out, "  Progress:     {:.2}% (idle)", progress.value)?;
                }
            }
            write_badges(&mut out, registrants, submissions)?;
            match register {
                Some(cta) if *registration_open => {
                    writeln!(out, "  Register:     {} {}", cta.note, cta.label)?;
                }
                _ => {
                    writeln!(out, "  Register:     closed")?;
                }
            }
            if let Some(link) = forum_link {
                writeln!(out, "  Forum:        {link}")?;
            }
        }
    }
    Ok(out)
}

fn write_badges(
    out: &mut String,
    registrants: &CountBadge,
    submissions: &CountBadge,
) -> fmt::Result {
    writeln!(
        out,
        "  Registrants:  {} ({})",
        registrants.tooltip, registrants.href
    )?;
    writeln!(
        out,
        "  Submissions:  {} ({})",
        submissions.tooltip, submissions.href
    )
}

fn cmd_check(file: &str, json_out: bool, strict: bool) -> Result<()> {
    let content =
        std::fs::read_to_string(file).map_err(|e| anyhow::anyhow!("cannot read {file}: {e}"))?;
    let data: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| anyhow::anyhow!("{file}: invalid JSON: {e}"))?;

    let report = challenge_status_core::schema::check(&data, file, strict);

    if json_out {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if report.pass {
            eprintln!("  ok  {file}");
        } else {
            eprintln!("  FAIL {file}");
        }
        for e in &report.errors {
            eprintln!(
                "  error {}: {} {}",
                e.code,
                e.message,
                e.path.as_deref().unwrap_or("")
            );
        }
        for w in &report.warnings {
            eprintln!(
                "  warn  {}: {} {}",
                w.code,
                w.message,
                w.path.as_deref().unwrap_or("")
            );
        }
    }

    if !report.pass {
        bail!("check failed for {file}");
    }
    Ok(())
}

fn cmd_list(dir: &str, now: DateTime<Utc>) -> Result<()> {
    let rows = challenge_status_engine::list::scan_dir(dir, now)?;
    challenge_status_engine::list::print_table(&rows);
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() && !force {
        bail!("{DEFAULT_CONFIG_PATH} already exists (use --force to overwrite)");
    }
    std::fs::create_dir_all(".challenge-status")?;
    let json = serde_json::to_string_pretty(&StatusConfig::default())?;
    std::fs::write(DEFAULT_CONFIG_PATH, &json)?;
    eprintln!("created {DEFAULT_CONFIG_PATH}");
    Ok(())
}
