//! Object keys and public URLs for transcripts
//!
//! Transcript URLs persisted on a meeting are full object-store URLs, not
//! bare keys; the prefix derived from bucket and region makes the mapping
//! reversible.

use super::TransferError;
use crate::config::TransferConfig;

/// Build the object key for a transcript: transcripts/{meetingId}/{fileName}
pub fn transcript_key(meeting_id: &str, file_name: &str) -> String {
    format!("transcripts/{meeting_id}/{file_name}")
}

/// Validate a user-supplied transcript file name before presigning.
pub fn validate_file_name(file_name: &str) -> Result<(), TransferError> {
    if file_name.trim().is_empty() {
        return Err(TransferError::InvalidFileName(
            "File name cannot be empty".to_string(),
        ));
    }
    if file_name.len() > 255 {
        return Err(TransferError::InvalidFileName(
            "File name too long (max 255 characters)".to_string(),
        ));
    }
    Ok(())
}

/// Bucket/region-derived URL prefix for stored objects
#[derive(Debug, Clone)]
pub struct ObjectStorePrefix {
    prefix: String,
}

impl ObjectStorePrefix {
    pub fn new(config: &TransferConfig) -> Self {
        Self {
            prefix: format!(
                "https://{}.s3.{}.amazonaws.com/",
                config.bucket, config.region
            ),
        }
    }

    /// Fully-qualified URL for an object key
    pub fn public_url(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Recover the object key from a stored transcript URL
    pub fn key_from_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(&self.prefix).filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefix() -> ObjectStorePrefix {
        ObjectStorePrefix::new(&TransferConfig {
            bucket: "meeting-transcripts".to_string(),
            region: "us-east-1".to_string(),
            presign_expiry_secs: 3600,
        })
    }

    #[test]
    fn transcript_key_layout() {
        assert_eq!(
            transcript_key("m-1", "notes.txt"),
            "transcripts/m-1/notes.txt"
        );
    }

    #[test]
    fn public_url_round_trips_to_key() {
        let p = prefix();
        let key = transcript_key("m-1", "notes.txt");
        let url = p.public_url(&key);
        assert_eq!(
            url,
            "https://meeting-transcripts.s3.us-east-1.amazonaws.com/transcripts/m-1/notes.txt"
        );
        assert_eq!(p.key_from_url(&url), Some(key.as_str()));
    }

    #[test]
    fn foreign_urls_do_not_yield_keys() {
        let p = prefix();
        assert_eq!(p.key_from_url("https://example.com/transcripts/x"), None);
        // Bare prefix with no key
        assert_eq!(
            p.key_from_url("https://meeting-transcripts.s3.us-east-1.amazonaws.com/"),
            None
        );
    }

    #[test]
    fn file_name_validation_bounds() {
        assert!(validate_file_name("notes.txt").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("   ").is_err());
        assert!(validate_file_name(&"x".repeat(255)).is_ok());
        assert!(validate_file_name(&"x".repeat(256)).is_err());
    }
}
