//! Integration tests for the `latest-video` binary.

#![allow(deprecated)] // cargo_bin deprecation — replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: a `latest-video` command with no YouTube settings, run in `dir`
/// so no stray .env gets picked up.
fn latest_video(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("latest-video").expect("binary 'latest-video' should be built");
    cmd.current_dir(dir)
        .env_remove("YOUTUBE_API_KEY")
        .env_remove("YOUTUBE_UPLOADS_PLAYLIST_ID")
        .env_remove("LATEST_VIDEO_OUT");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    latest_video(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("preview"));
}

#[test]
fn fetch_without_api_key_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    latest_video(dir.path())
        .arg("fetch")
        .env("YOUTUBE_UPLOADS_PLAYLIST_ID", "UUabc")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing env var: YOUTUBE_API_KEY"));

    assert!(!dir.path().join("data").exists());
}

#[test]
fn default_command_is_fetch() {
    let dir = tempfile::tempdir().unwrap();
    latest_video(dir.path())
        .env("YOUTUBE_API_KEY", "key")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Missing env var: YOUTUBE_UPLOADS_PLAYLIST_ID",
        ));
}

#[test]
fn preview_from_file_shows_latest_embed() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("latest.json");
    std::fs::write(
        &record,
        r#"{"videoId":"dQw4w9WgXcQ","title":"Episode 2","publishedAt":null,"updatedAt":"2024-01-01T00:00:00.000Z"}"#,
    )
    .unwrap();

    latest_video(dir.path())
        .arg("preview")
        .arg("--file")
        .arg(&record)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "src:    https://www.youtube.com/embed/dQw4w9WgXcQ",
        ))
        .stdout(predicate::str::contains("status: Now playing: Episode 2"));
}

#[test]
fn preview_keeps_fallback_on_bad_record() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("latest.json");
    std::fs::write(&record, r#"{"videoId":"not valid!"}"#).unwrap();

    latest_video(dir.path())
        .args(["preview", "--fallback", "S3M_Z2CdGqg", "--file"])
        .arg(&record)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "src:    https://www.youtube.com/embed/S3M_Z2CdGqg",
        ))
        .stdout(predicate::str::contains(
            "Latest video temporarily unavailable",
        ));
}

#[test]
fn preview_rejects_malformed_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let record = dir.path().join("latest.json");
    std::fs::write(&record, r#"{"videoId":"S3M_Z2CdGqg"}"#).unwrap();

    latest_video(dir.path())
        .args(["preview", "--fallback", "bad id", "--file"])
        .arg(&record)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"))
        .stderr(predicate::str::contains("--fallback"))
        .stdout(predicate::str::is_empty());
}
