// Centralized configuration for the latest-video tooling

use std::env;
use std::path::PathBuf;

use super::error::FetchError;

/// Env var holding the YouTube Data API key
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Env var holding the uploads playlist id (starts with "UU...")
pub const PLAYLIST_ID_VAR: &str = "YOUTUBE_UPLOADS_PLAYLIST_ID";

/// Optional override for where the record gets written
pub const OUT_FILE_VAR: &str = "LATEST_VIDEO_OUT";

/// Default record location, relative to the site root
pub const OUT_FILE: &str = "data/latest.json";

/// Where the page loader looks for the record, relative to the page
pub const LATEST_JSON_PATH: &str = "./data/latest.json";

/// Video shown by the hand-authored markup before any loader runs
pub const FALLBACK_VIDEO_ID: &str = "S3M_Z2CdGqg";

pub const PLAYLIST_ITEMS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/playlistItems";

pub const USER_AGENT: &str = "mk-website-bot/1.0";

/// Placeholder title when the API item has none
pub const DEFAULT_TITLE: &str = "Latest video";

/// Page element ids the loader works against
pub mod elements {
    pub const FRAME_ID: &str = "latest-iframe";
    pub const STATUS_ID: &str = "latest-meta";
}

/// Status texts shown by the page loader
pub mod status {
    pub const LOADING: &str = "Loading latest video…";
    pub const UNAVAILABLE: &str = "Latest video temporarily unavailable — showing fallback.";
}

/// Settings for one fetcher run
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub api_key: String,
    pub playlist_id: String,
    pub out_file: PathBuf,
}

impl FetcherConfig {
    /// Read the fetcher settings from the process environment
    pub fn from_env() -> Result<Self, FetchError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the settings from any name -> value lookup.
    /// Empty values count as missing; the API key is checked first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FetchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(FetchError::MissingEnv(name))
        };

        let api_key = required(API_KEY_VAR)?;
        let playlist_id = required(PLAYLIST_ID_VAR)?;
        let out_file = lookup(OUT_FILE_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(OUT_FILE));

        Ok(Self {
            api_key,
            playlist_id,
            out_file,
        })
    }
}
