use challenge_status_core::challenge::ChallengeSummary;
use challenge_status_core::config::UrlConfig;

/// Ids shorter than this on DATA_SCIENCE are legacy marathon-match rounds.
const ID_LENGTH: usize = 6;

/// Which marathon-match listing a count badge points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongContestModule {
    ViewRegistrants,
    ViewStandings,
}

impl LongContestModule {
    fn as_str(self) -> &'static str {
        match self {
            LongContestModule::ViewRegistrants => "ViewRegistrants",
            LongContestModule::ViewStandings => "ViewStandings",
        }
    }
}

/// Registrant list on the challenge details page.
pub fn details_href(challenge: &ChallengeSummary, urls: &UrlConfig) -> String {
    format!(
        "{}{}/?type={}#viewRegistrant",
        urls.challenge_url(),
        challenge.id_string(),
        challenge.track.to_lowercase()
    )
}

/// Count badge target on an active card.
///
/// Legacy data-science rounds link to the community site, newer ones to the
/// develop details page.
pub fn active_count_href(
    challenge: &ChallengeSummary,
    urls: &UrlConfig,
    module: LongContestModule,
) -> String {
    if challenge.track != "DATA_SCIENCE" {
        return details_href(challenge, urls);
    }
    let id = challenge.id_string();
    if id.len() < ID_LENGTH {
        format!("{}={}&rd={id}", urls.long_contest_url(), module.as_str())
    } else {
        format!("{}{id}/?type=develop#viewRegistrant", urls.challenge_url())
    }
}

/// Forum link, shown only on the viewer's own challenges.
pub fn forum_href(challenge: &ChallengeSummary, urls: &UrlConfig) -> Option<String> {
    if !challenge.my_challenge {
        return None;
    }
    challenge
        .forum_id_string()
        .filter(|id| !id.is_empty())
        .map(|id| format!("{}{id}", urls.forum_url()))
}
