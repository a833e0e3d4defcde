// Page loader
// Swaps the page's fallback embed for the latest upload, never breaking the page

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::utils::config::{elements, status, LATEST_JSON_PATH};
use crate::utils::error::LoadError;
use crate::utils::formatters::status_text;
use crate::utils::video_id::{build_embed_url, video_id_from_json};

/// A page element: attributes plus text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    attributes: HashMap<String, String>,
    text: String,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// Minimal DOM: elements addressable by id
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: HashMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, id: &str, element: Element) -> Self {
        self.elements.insert(id.to_string(), element);
        self
    }

    /// The hand-authored markup: a frame already playing `fallback_id` plus an empty status line
    pub fn with_fallback(fallback_id: &str) -> Self {
        let src = build_embed_url(fallback_id).unwrap_or_default();
        Self::new()
            .with_element(elements::FRAME_ID, Element::new().with_attr("src", &src))
            .with_element(elements::STATUS_ID, Element::new())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Current embed address, if the page has a frame
    pub fn frame_src(&self) -> Option<&str> {
        self.get_element_by_id(elements::FRAME_ID)?.attr("src")
    }

    /// Current status line, if the page has one
    pub fn status_text(&self) -> Option<&str> {
        self.get_element_by_id(elements::STATUS_ID).map(Element::text)
    }

    fn set_status(&mut self, text: &str) {
        if let Some(meta) = self.get_element_by_id_mut(elements::STATUS_ID) {
            meta.set_text(text);
        }
    }
}

/// Where the loader gets the latest.json document from
pub trait RecordSource {
    fn fetch_record(&self) -> impl Future<Output = Result<Value, LoadError>>;
}

/// latest.json served next to the page, fetched with caching disabled
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpRecordSource {
    /// Resolve the record path against the page/site URL
    pub fn new(client: reqwest::Client, page_url: &Url) -> Result<Self, url::ParseError> {
        let url = page_url.join(LATEST_JSON_PATH)?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl RecordSource for HttpRecordSource {
    async fn fetch_record(&self) -> Result<Value, LoadError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                url: self.url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// latest.json straight from a build output directory
#[derive(Debug, Clone)]
pub struct FileRecordSource {
    path: PathBuf,
}

impl FileRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileRecordSource {
    async fn fetch_record(&self) -> Result<Value, LoadError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// What a loader run did to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No frame on this page
    Skipped,
    /// Frame now points at this embed URL
    Updated(String),
    /// Something failed; the fallback embed stays
    Fallback,
}

/// Validated view of the record
struct LatestEmbed {
    embed_url: String,
    status: String,
}

fn read_record(data: &Value) -> Result<LatestEmbed, LoadError> {
    let video_id = video_id_from_json(&data["videoId"]).ok_or(LoadError::InvalidVideoId)?;
    let embed_url = build_embed_url(video_id).ok_or(LoadError::InvalidVideoId)?;

    Ok(LatestEmbed {
        embed_url,
        status: status_text(data["title"].as_str(), data["updatedAt"].as_str()),
    })
}

/// Point the page's frame at the latest upload.
/// Failures are logged and leave the frame's existing src alone.
pub async fn load_latest_video<S: RecordSource>(doc: &mut Document, source: &S) -> LoadOutcome {
    if doc.get_element_by_id(elements::FRAME_ID).is_none() {
        debug!("no #{} on this page, nothing to load", elements::FRAME_ID);
        return LoadOutcome::Skipped;
    }

    doc.set_status(status::LOADING);

    match source.fetch_record().await.and_then(|data| read_record(&data)) {
        Ok(latest) => {
            if let Some(frame) = doc.get_element_by_id_mut(elements::FRAME_ID) {
                frame.set_attr("src", &latest.embed_url);
            }
            doc.set_status(&latest.status);
            LoadOutcome::Updated(latest.embed_url)
        }
        Err(e) => {
            error!("Latest video load failed: {}", e);
            doc.set_status(status::UNAVAILABLE);
            LoadOutcome::Fallback
        }
    }
}
