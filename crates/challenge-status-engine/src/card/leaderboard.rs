use serde::Serialize;

use challenge_status_core::challenge::Winner;

pub const MAX_VISIBLE_WINNERS: usize = 3;

/// Completed-card leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Leaderboard {
    /// No winners field on the record: link to the submissions tab instead.
    Results { href: String },
    Winners { entries: Vec<LeaderboardEntry> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeaderboardEntry {
    Winner {
        handle: String,
        position: u32,
        #[serde(skip_serializing_if = "Option::is_none")]
        photo_url: Option<String>,
        profile: UserProfile,
    },
    /// "+N" bubble standing in for the winners that did not fit.
    Overflow {
        handle: String,
        href: String,
        new_tab: bool,
    },
}

/// Profile shape expected by the avatar tooltip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub handle: String,
    pub placement: u32,
    pub country: String,
    pub member_since: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_link: Option<String>,
    pub rating_summary: Vec<serde_json::Value>,
}

impl From<&Winner> for UserProfile {
    fn from(w: &Winner) -> Self {
        Self {
            handle: w.handle.clone(),
            placement: w.placement,
            country: String::new(),
            member_since: String::new(),
            photo_link: w.photo_url.clone(),
            rating_summary: Vec::new(),
        }
    }
}

/// Build the leaderboard from the record's winners, final placements only.
pub fn build_leaderboard(
    winners: Option<&[Winner]>,
    detail_link: &str,
    open_in_new_tab: bool,
) -> Leaderboard {
    let Some(winners) = winners else {
        return Leaderboard::Results {
            href: format!("{detail_link}&tab=submissions"),
        };
    };

    let finals: Vec<&Winner> = winners.iter().filter(|w| w.is_final()).collect();
    let mut entries: Vec<LeaderboardEntry> = finals
        .iter()
        .take(MAX_VISIBLE_WINNERS)
        .map(|w| LeaderboardEntry::Winner {
            handle: w.handle.clone(),
            position: w.placement,
            photo_url: w.photo_url.clone(),
            profile: UserProfile::from(*w),
        })
        .collect();

    if finals.len() > MAX_VISIBLE_WINNERS {
        entries.push(LeaderboardEntry::Overflow {
            handle: format!("+{}", finals.len() - MAX_VISIBLE_WINNERS),
            href: format!("{detail_link}&tab=winners"),
            new_tab: open_in_new_tab,
        });
    }

    Leaderboard::Winners { entries }
}
