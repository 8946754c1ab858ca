//! Media host integration.
//!
//! The [`MediaStore`] trait is the seam between request handlers and the
//! external image host; `upload_batch` and `merge_image_sets` carry the
//! invariants the rest of the system relies on.

mod cdn;
mod http;

pub use cdn::rewrite_for_width;
pub use http::HttpMediaStore;

use std::collections::HashSet;

use async_trait::async_trait;
use bytes::Bytes;

/// A successfully stored image: the public URL plus the host's deletion token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    pub url: String,
    pub public_id: String,
}

/// Error from the media host.
#[derive(Debug)]
pub enum MediaError {
    /// Transport-level failure reaching the host
    Transport(String),
    /// The host answered with a non-success status
    Rejected { status: u16, body: String },
    /// The host's response could not be decoded
    BadResponse(String),
}

impl std::fmt::Display for MediaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaError::Transport(msg) => write!(f, "media host unreachable: {}", msg),
            MediaError::Rejected { status, body } => {
                write!(f, "media host rejected request ({}): {}", status, body)
            }
            MediaError::BadResponse(msg) => write!(f, "invalid media host response: {}", msg),
        }
    }
}

impl std::error::Error for MediaError {}

/// Storage backend for binary image content.
///
/// Implemented by the production HTTP client and by the in-memory mock the
/// integration tests inject.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store one image under the given folder tag. Returns the public URL
    /// and the deletion token.
    async fn upload(&self, bytes: Bytes, folder: &str) -> Result<UploadedMedia, MediaError>;

    /// Remove previously uploaded media by its deletion token.
    async fn delete(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Upload a batch of files concurrently, all tagged with the same folder.
///
/// All-or-nothing: if any single upload fails the whole batch fails and no
/// partial results reach the caller. Files that already landed on the host
/// stay there; there is no compensation pass. An empty batch is valid and
/// yields an empty result.
pub async fn upload_batch(
    store: &dyn MediaStore,
    files: Vec<Bytes>,
    folder: &str,
) -> Result<Vec<UploadedMedia>, MediaError> {
    let uploads = files.into_iter().map(|bytes| store.upload(bytes, folder));
    futures::future::try_join_all(uploads).await
}

/// Merge kept and newly uploaded image URLs for the edit path.
///
/// Order-preserving union: kept entries first, then uploads, deduplicated by
/// exact string equality. Never drops an entry present in either input.
pub fn merge_image_sets(kept: &[String], uploaded: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(kept.len() + uploaded.len());
    for url in kept.iter().chain(uploaded.iter()) {
        if seen.insert(url.as_str()) {
            merged.push(url.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_kept_precedes_uploaded() {
        let merged = merge_image_sets(&urls(&["a", "b"]), &urls(&["c", "d"]));
        assert_eq!(merged, urls(&["a", "b", "c", "d"]));
    }

    #[test]
    fn test_merge_dedups_by_url_string() {
        let merged = merge_image_sets(&urls(&["a", "b"]), &urls(&["b", "c", "a"]));
        assert_eq!(merged, urls(&["a", "b", "c"]));
    }

    #[test]
    fn test_merge_dedups_within_one_side() {
        let merged = merge_image_sets(&urls(&["a", "a", "b"]), &[]);
        assert_eq!(merged, urls(&["a", "b"]));
    }

    #[test]
    fn test_merge_never_drops_entries() {
        let kept = urls(&["a", "b"]);
        let uploaded = urls(&["c"]);
        let merged = merge_image_sets(&kept, &uploaded);
        for url in kept.iter().chain(uploaded.iter()) {
            assert!(merged.contains(url));
        }
    }

    #[test]
    fn test_merge_is_idempotent() {
        let merged = merge_image_sets(&urls(&["a", "b"]), &urls(&["b", "c"]));
        assert_eq!(merge_image_sets(&merged, &[]), merged);
    }

    #[test]
    fn test_merge_empty_inputs() {
        assert!(merge_image_sets(&[], &[]).is_empty());
        assert_eq!(merge_image_sets(&[], &urls(&["x"])), urls(&["x"]));
    }
}
