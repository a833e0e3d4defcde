// Utility functions module
pub mod config;
pub mod error;
pub mod formatters;
pub mod retry;
pub mod video_id;
