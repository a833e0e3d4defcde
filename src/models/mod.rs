// Data models
pub mod latest_video;
