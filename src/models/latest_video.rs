// Latest video record
// Matches the data/latest.json document served next to the site

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::error::FetchError;

/// The newest upload, as written by the fetcher and read by the page loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestVideoRecord {
    pub video_id: String,
    pub title: String,
    pub published_at: Option<String>,
    pub updated_at: String,
}

impl LatestVideoRecord {
    /// Create a record stamped with the current time
    pub fn new(video_id: String, title: String, published_at: Option<String>) -> Self {
        Self {
            video_id,
            title,
            published_at,
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Pretty JSON (2-space indent) with a trailing newline
    pub fn to_json_document(&self) -> Result<String, FetchError> {
        let mut json = serde_json::to_string_pretty(self).map_err(FetchError::Serialize)?;
        json.push('\n');
        Ok(json)
    }
}
