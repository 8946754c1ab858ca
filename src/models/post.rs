//! Post model: a dated announcement with photos.

use serde::{Deserialize, Serialize};

/// A published announcement. `images` holds fully-qualified media-host URLs
/// in display order; the list never contains duplicates after an edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// Calendar date as `YYYY-MM-DD` text, kept as the client sent it.
    pub date: String,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Validated fields for creating a post, extracted from the multipart form.
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub title: String,
    pub description: String,
    pub date: String,
    pub images: Vec<String>,
}

/// Partial update for a post. `None` means the field was absent from the
/// request and the stored value is kept; `Some("")` still overwrites.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub images: Vec<String>,
}

/// JSON body for `DELETE /api/posts`.
#[derive(Debug, Deserialize)]
pub struct DeleteByIdRequest {
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// Envelope for `GET /api/posts`.
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub success: bool,
    pub posts: Vec<Post>,
}

/// Envelope for post create/update responses.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub success: bool,
    pub post: Post,
}

/// Envelope for delete acknowledgements.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
