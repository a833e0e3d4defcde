// Fetcher
// Looks up the newest upload and rewrites data/latest.json

use std::path::Path;

use tracing::info;

use crate::api::youtube::{fetch_latest_upload, Transport};
use crate::models::latest_video::LatestVideoRecord;
use crate::utils::config::FetcherConfig;
use crate::utils::error::FetchError;
use crate::utils::retry::RetryPolicy;
use crate::utils::video_id::is_valid_video_id;

/// One full fetcher run: query the API, then replace the record on disk.
/// Nothing is written unless every step before it succeeded.
pub async fn run<T: Transport>(
    transport: &T,
    config: &FetcherConfig,
    policy: &RetryPolicy,
) -> Result<LatestVideoRecord, FetchError> {
    let latest = fetch_latest_upload(transport, policy, &config.api_key, &config.playlist_id).await?;

    if !is_valid_video_id(&latest.video_id) {
        return Err(FetchError::InvalidVideoId(latest.video_id));
    }

    let record = LatestVideoRecord::new(latest.video_id, latest.title, latest.published_at);
    write_record(&config.out_file, &record).await?;

    info!("Updated {} -> {}", config.out_file.display(), record.video_id);
    Ok(record)
}

/// Overwrite `path` with the record, creating parent directories
pub async fn write_record(path: &Path, record: &LatestVideoRecord) -> Result<(), FetchError> {
    let json = record.to_json_document()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, json).await?;

    Ok(())
}
