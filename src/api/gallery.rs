//! Gallery API endpoints.

use axum::{
    extract::{Multipart, Query, State},
    Json,
};
use bytes::Bytes;

use super::{ApiResult, ListParams};
use crate::errors::AppError;
use crate::media::{rewrite_for_width, upload_batch};
use crate::models::{DeleteByIdRequest, DeleteResponse, GalleryListResponse};
use crate::AppState;

/// Media host folder tag for gallery uploads.
const GALLERY_FOLDER: &str = "gallery";

/// GET /api/gallery - List all gallery images, newest first.
pub async fn list_gallery(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<GalleryListResponse> {
    let mut images = state.repo.list_gallery().await?;

    if let Some(width) = params.width {
        for image in &mut images {
            image.url = rewrite_for_width(&image.url, width);
        }
    }

    Ok(Json(GalleryListResponse {
        success: true,
        images,
    }))
}

/// POST /api/gallery - Upload a batch of images, one record per file.
///
/// The whole batch shares the optional `title` caption. Uploads are
/// all-or-nothing: any single failure fails the request and no records
/// are written.
pub async fn upload_gallery(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<GalleryListResponse> {
    let mut title = String::new();
    let mut files: Vec<Bytes> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("images") => files.push(field.bytes().await?),
            Some("title") => title = field.text().await?,
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }

    let uploaded = upload_batch(state.media.as_ref(), files, GALLERY_FOLDER).await?;
    let images = state.repo.insert_gallery_images(&uploaded, &title).await?;

    tracing::info!("Uploaded {} gallery images", images.len());

    Ok(Json(GalleryListResponse {
        success: true,
        images,
    }))
}

/// DELETE /api/gallery - Delete one image by id.
///
/// Remote media is destroyed before the local record. A failed or skipped
/// remote destroy is logged and degraded, never fatal to the request.
pub async fn delete_gallery_image(
    State(state): State<AppState>,
    Json(request): Json<DeleteByIdRequest>,
) -> ApiResult<DeleteResponse> {
    let Some(id) = request.id else {
        return Err(AppError::BadRequest("Missing id".to_string()));
    };

    let image = state
        .repo
        .get_gallery_image(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    if image.public_id.is_empty() {
        // No deletion token recorded; the remote copy is orphaned.
        tracing::warn!("Gallery image {} has no publicId, skipping remote delete", id);
    } else if let Err(e) = state.media.delete(&image.public_id).await {
        tracing::warn!("Remote delete of {} failed: {}", image.public_id, e);
    }

    state.repo.delete_gallery_image(&id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: Some("Image deleted".to_string()),
    }))
}
