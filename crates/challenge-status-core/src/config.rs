use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Workspace-local config location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".challenge-status/config.json";

/// Link configuration for status cards.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    pub urls: UrlConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    pub base: String,
    pub community: String,
    pub forums: String,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            base: "https://www.topcoder.com".into(),
            community: "https://community.topcoder.com".into(),
            forums: "https://apps.topcoder.com/forums".into(),
        }
    }
}

impl UrlConfig {
    /// Prefix for challenge detail pages; the challenge id is appended.
    pub fn challenge_url(&self) -> String {
        format!("{}/challenge-details/", trim_slash(&self.base))
    }

    /// Prefix for forum categories; the forum id is appended.
    pub fn forum_url(&self) -> String {
        format!("{}/?module=Category&categoryID=", trim_slash(&self.forums))
    }

    /// Marathon-match listing prefix; a module name and round id follow.
    pub fn long_contest_url(&self) -> String {
        format!("{}/longcontest/?module", trim_slash(&self.community))
    }
}

fn trim_slash(s: &str) -> &str {
    s.trim_end_matches('/')
}

/// Load config from an explicit path, else [`DEFAULT_CONFIG_PATH`], else defaults.
///
/// A missing default file is not an error; a missing explicit file is.
pub fn load_config(explicit: Option<&str>) -> Result<StatusConfig, ConfigError> {
    let path = match explicit {
        Some(p) => p,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH,
        None => return Ok(StatusConfig::default()),
    };
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_string(),
        source: e,
    })
}
