use std::time::Duration;

use crate::error::{Error, Result};

/// Video metadata source; the video id is appended verbatim.
pub const META_URL: &str = "http://www.youtube.com/get_video_info?&video_id=";

/// Container tokens tried in order against an encoding's type string.
pub const VIDEO_FORMATS: [&str; 5] = ["3gp", "mp4", "flv", "webm", "avi"];

/// Extension used when no entry of [`VIDEO_FORMATS`] matches.
pub const FALLBACK_EXTENSION: &str = "avi";

pub const DEFAULT_USER_AGENT: &str = concat!("tubegrab/", env!("CARGO_PKG_VERSION"));

const META_URL_ENV: &str = "TUBEGRAB_META_URL";
const TIMEOUT_ENV: &str = "TUBEGRAB_TIMEOUT_SECS";

/// Settings shared by every request a [`crate::Client`] issues.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix the video id is appended to.
    pub meta_url: String,
    pub user_agent: String,
    /// Whole-request timeout. `None` lets long transfers run to completion.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            meta_url: META_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `TUBEGRAB_META_URL` and `TUBEGRAB_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup(META_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.meta_url = url;
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| Error::Config(format!("{TIMEOUT_ENV}={raw:?}: {e}")))?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn meta_url_for(&self, video_id: &str) -> String {
        format!("{}{}", self.meta_url, video_id)
    }
}
