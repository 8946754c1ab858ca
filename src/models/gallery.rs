//! Gallery image model.

use serde::{Deserialize, Serialize};

/// A single gallery photo stored on the media host.
///
/// `public_id` is the host's deletion token. A record persisted without one
/// can never be removed from the remote store (orphaned-media risk), so the
/// upload path always captures it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    pub public_id: String,
    /// Optional caption, shared by every image of an upload batch.
    #[serde(default)]
    pub title: String,
    pub created_at: String,
}

/// Envelope for gallery list and upload responses.
#[derive(Debug, Serialize)]
pub struct GalleryListResponse {
    pub success: bool,
    pub images: Vec<GalleryImage>,
}
