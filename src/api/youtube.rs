// YouTube Data API client
// For finding the newest upload of a channel's uploads playlist

use std::future::Future;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::utils::config::{DEFAULT_TITLE, PLAYLIST_ITEMS_ENDPOINT};
use crate::utils::error::FetchError;
use crate::utils::formatters::snippet;
use crate::utils::retry::{retry, RetryPolicy};

/// Statuses the API is known to return for temporary trouble
pub const TRANSIENT_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

const TRANSIENT_BODY_SNIPPET: usize = 200;
const ERROR_BODY_SNIPPET: usize = 300;

/// Status and body of one HTTP exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Seam between the API logic and the wire
pub trait Transport {
    fn get(&self, url: &Url) -> impl Future<Output = Result<RawResponse, FetchError>>;
}

impl Transport for reqwest::Client {
    async fn get(&self, url: &Url) -> Result<RawResponse, FetchError> {
        let response = reqwest::Client::get(self, url.clone()).send().await?;
        let status = response.status();
        let body = if status.is_success() {
            // A cut-off success body is a transport failure, not bad JSON
            response.text().await?
        } else {
            // Error bodies only feed the message; the status is what counts
            response.text().await.unwrap_or_default()
        };
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Newest playlist entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestUpload {
    pub video_id: String,
    pub title: String,
    pub published_at: Option<String>,
}

/// Build the playlistItems request URL asking for just the newest entry
pub fn playlist_items_url(api_key: &str, playlist_id: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        PLAYLIST_ITEMS_ENDPOINT,
        &[
            ("key", api_key),
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", "1"),
        ],
    )
}

/// Turn a raw response into parsed API data, classifying failures for the retry loop
pub fn parse_response(response: RawResponse) -> Result<PlaylistItemsResponse, FetchError> {
    let RawResponse { status, body } = response;

    if TRANSIENT_STATUSES.contains(&status) {
        return Err(FetchError::Transient {
            status,
            body: snippet(&body, TRANSIENT_BODY_SNIPPET),
        });
    }

    if !(200..300).contains(&status) {
        return Err(FetchError::Http {
            status,
            body: snippet(&body, ERROR_BODY_SNIPPET),
        });
    }

    serde_json::from_str(&body).map_err(FetchError::InvalidJson)
}

/// Pick the first playlist item apart
pub fn extract_latest(data: PlaylistItemsResponse) -> Result<LatestUpload, FetchError> {
    let snippet = data
        .items
        .into_iter()
        .next()
        .and_then(|item| item.snippet)
        .ok_or(FetchError::MissingVideoId)?;

    let video_id = snippet
        .resource_id
        .and_then(|r| r.video_id)
        .filter(|id| !id.is_empty())
        .ok_or(FetchError::MissingVideoId)?;

    Ok(LatestUpload {
        video_id,
        title: snippet.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        published_at: snippet.published_at,
    })
}

/// Fetch the newest upload of a playlist, retrying transient failures
pub async fn fetch_latest_upload<T: Transport>(
    transport: &T,
    policy: &RetryPolicy,
    api_key: &str,
    playlist_id: &str,
) -> Result<LatestUpload, FetchError> {
    let url = playlist_items_url(api_key, playlist_id)?;
    let url = &url;

    let data = retry(policy, move |attempt| async move {
        debug!("playlistItems attempt {}", attempt);
        parse_response(transport.get(url).await?)
    })
    .await?;

    extract_latest(data)
}

// YouTube API response structures
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Option<PlaylistSnippet>,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(rename = "resourceId")]
    resource_id: Option<ResourceId>,
}

#[derive(Debug, Deserialize)]
struct ResourceId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}
