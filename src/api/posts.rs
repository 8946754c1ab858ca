//! Post API endpoints.

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use bytes::Bytes;

use super::{ApiResult, ListParams};
use crate::errors::AppError;
use crate::media::{merge_image_sets, rewrite_for_width, upload_batch};
use crate::models::{
    CreatePostRequest, DeleteByIdRequest, DeleteResponse, Post, PostListResponse, PostResponse,
    UpdatePostRequest,
};
use crate::AppState;

/// Media host folder tag for post uploads.
const POSTS_FOLDER: &str = "posts";

/// GET /api/posts - List all posts, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PostListResponse> {
    let mut posts = state.repo.list_posts().await?;

    if let Some(width) = params.width {
        for post in &mut posts {
            for url in &mut post.images {
                *url = rewrite_for_width(url, width);
            }
        }
    }

    Ok(Json(PostListResponse {
        success: true,
        posts,
    }))
}

/// GET /api/posts/:id - Get a single post.
pub async fn get_post(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Post> {
    let post = state
        .repo
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".to_string()))?;

    Ok(Json(post))
}

/// POST /api/posts - Create a post from a multipart form.
///
/// Required fields are validated before any upload is attempted; an upload
/// failure anywhere in the batch means no record is created.
pub async fn create_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<PostResponse> {
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut date: Option<String> = None;
    let mut files: Vec<Bytes> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("title") => title = Some(field.text().await?),
            Some("description") => description = Some(field.text().await?),
            Some("date") => date = Some(field.text().await?),
            Some("images") => files.push(field.bytes().await?),
            _ => {}
        }
    }

    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;
    let description = description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("Description is required".to_string()))?;
    let date = date
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("Date is required".to_string()))?;

    let uploaded = upload_batch(state.media.as_ref(), files, POSTS_FOLDER).await?;
    let images = uploaded.into_iter().map(|m| m.url).collect();

    let post = state
        .repo
        .create_post(&CreatePostRequest {
            title,
            description,
            date,
            images,
        })
        .await?;

    tracing::info!("Created post {}", post.id);

    Ok(Json(PostResponse {
        success: true,
        post,
    }))
}

/// PUT /api/posts/:id - Partially update a post from a multipart form.
///
/// Scalar fields update only when present in the request (a field sent
/// empty still overwrites). `existingImages` is a JSON-encoded array of
/// URLs to retain; when missing or malformed the stored list is kept.
/// New files are uploaded all-or-nothing and merged after the kept URLs,
/// deduplicated.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<PostResponse> {
    // Fail fast before any upload work
    let current = state
        .repo
        .get_post(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut date: Option<String> = None;
    let mut existing_images_raw: Option<String> = None;
    let mut files: Vec<Bytes> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("title") => title = Some(field.text().await?),
            Some("description") => description = Some(field.text().await?),
            Some("date") => date = Some(field.text().await?),
            Some("existingImages") => existing_images_raw = Some(field.text().await?),
            Some("images") => files.push(field.bytes().await?),
            _ => {}
        }
    }

    // Malformed kept-list falls back to the stored images silently
    let kept = existing_images_raw
        .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
        .unwrap_or_else(|| current.images.clone());

    let uploaded = upload_batch(state.media.as_ref(), files, POSTS_FOLDER).await?;
    let uploaded_urls: Vec<String> = uploaded.into_iter().map(|m| m.url).collect();

    let images = merge_image_sets(&kept, &uploaded_urls);

    let post = state
        .repo
        .update_post(
            &id,
            &UpdatePostRequest {
                title,
                description,
                date,
                images,
            },
        )
        .await?;

    Ok(Json(PostResponse {
        success: true,
        post,
    }))
}

/// DELETE /api/posts - Delete a post by id.
///
/// Deleting an unknown id still succeeds; only a missing id is an error.
pub async fn delete_post(
    State(state): State<AppState>,
    Json(request): Json<DeleteByIdRequest>,
) -> ApiResult<DeleteResponse> {
    let Some(id) = request.id else {
        return Err(AppError::BadRequest("Missing id".to_string()));
    };

    state.repo.delete_post(&id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: None,
    }))
}
