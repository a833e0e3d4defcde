// YouTube video id validation and embed URLs

/// Length of every YouTube video id
pub const VIDEO_ID_LEN: usize = 11;

pub const EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

/// Check that a string is a well-formed YouTube video id:
/// exactly 11 characters from [A-Za-z0-9_-]
pub fn is_valid_video_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Pull a valid video id out of an arbitrary JSON value
pub fn video_id_from_json(value: &serde_json::Value) -> Option<&str> {
    value.as_str().filter(|id| is_valid_video_id(id))
}

/// Build the embeddable player URL for a video id.
/// Returns None for ids that fail validation so nothing unsafe reaches the page.
pub fn build_embed_url(video_id: &str) -> Option<String> {
    if !is_valid_video_id(video_id) {
        return None;
    }
    Some(format!("{}{}", EMBED_URL_BASE, video_id))
}

/// Command-line argument parser that only lets well-formed ids through
pub fn parse_video_id(arg: &str) -> Result<String, String> {
    if is_valid_video_id(arg) {
        Ok(arg.to_string())
    } else {
        Err(format!(
            "expected {} characters from [A-Za-z0-9_-], got {:?}",
            VIDEO_ID_LEN, arg
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_known_id() {
        assert!(is_valid_video_id("S3M_Z2CdGqg"));
        assert!(is_valid_video_id("dQw4w9WgXcQ"));
        assert!(is_valid_video_id("a-b_c-d_e-f"));
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            build_embed_url("S3M_Z2CdGqg").as_deref(),
            Some("https://www.youtube.com/embed/S3M_Z2CdGqg")
        );
        assert_eq!(build_embed_url("nope"), None);
    }

    #[test]
    fn test_rejects_wrong_length() {
        for len in (0..32).filter(|&n| n != VIDEO_ID_LEN) {
            let id = "a".repeat(len);
            assert!(!is_valid_video_id(&id), "length {} accepted", len);
        }
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        // Each of these swaps one character of a valid id
        for bad in [' ', '.', '/', '?', '&', '"', '<', '=', '+', '%', 'é', '\n'] {
            let mut id = String::from("S3M_Z2CdGq");
            id.push(bad);
            assert!(!is_valid_video_id(&id), "{:?} accepted", id);
        }
    }

    #[test]
    fn test_rejects_multibyte_eleven_chars() {
        // 11 chars but more than 11 bytes
        assert!(!is_valid_video_id("ééééééééééé"));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(video_id_from_json(&json!("S3M_Z2CdGqg")), Some("S3M_Z2CdGqg"));
        assert_eq!(video_id_from_json(&json!(12345678901u64)), None);
        assert_eq!(video_id_from_json(&json!(null)), None);
        assert_eq!(video_id_from_json(&json!(["S3M_Z2CdGqg"])), None);
    }
    #[test]
    fn test_parse_video_id_arg() {
        assert_eq!(parse_video_id("S3M_Z2CdGqg").as_deref(), Ok("S3M_Z2CdGqg"));
        assert!(parse_video_id("").is_err());
        assert!(parse_video_id("not valid!!").is_err());
    }
}
