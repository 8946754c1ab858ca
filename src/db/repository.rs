//! Database repository for CRUD operations.
//!
//! Uses prepared statements throughout. Image URL lists are stored as JSON
//! text columns; rows are mapped back through the `*_from_row` helpers.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::media::UploadedMedia;
use crate::models::{CreatePostRequest, GalleryImage, Post, UpdatePostRequest};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== POST OPERATIONS ====================

    /// List all posts, newest first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, description, date, images, created_at, updated_at FROM posts ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| post_from_row(&row)).collect())
    }

    /// Get a post by ID.
    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, description, date, images, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(post_from_row))
    }

    /// Create a new post. The image list must already be durable media URLs.
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let images_json = images_to_json(&request.images);

        sqlx::query(
            "INSERT INTO posts (id, title, description, date, images, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.date)
        .bind(&images_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Post {
            id,
            title: request.title.clone(),
            description: request.description.clone(),
            date: request.date.clone(),
            images: request.images.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Update a post. Scalar fields absent from the request keep their
    /// stored values; the image list is always replaced with the merged
    /// list the caller computed.
    pub async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<Post, AppError> {
        let existing = self
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let now = Utc::now().to_rfc3339();
        let title = request.title.clone().unwrap_or(existing.title);
        let description = request.description.clone().unwrap_or(existing.description);
        let date = request.date.clone().unwrap_or(existing.date);
        let images_json = images_to_json(&request.images);

        sqlx::query(
            "UPDATE posts SET title = ?, description = ?, date = ?, images = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&title)
        .bind(&description)
        .bind(&date)
        .bind(&images_json)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(Post {
            id: id.to_string(),
            title,
            description,
            date,
            images: request.images.clone(),
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Delete a post. Deleting an unknown id is a no-op, not an error.
    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // ==================== GALLERY OPERATIONS ====================

    /// List all gallery images, newest first.
    pub async fn list_gallery(&self) -> Result<Vec<GalleryImage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, url, public_id, title, created_at FROM gallery ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| gallery_from_row(&row)).collect())
    }

    /// Get a gallery image by ID.
    pub async fn get_gallery_image(&self, id: &str) -> Result<Option<GalleryImage>, AppError> {
        let row =
            sqlx::query("SELECT id, url, public_id, title, created_at FROM gallery WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.as_ref().map(gallery_from_row))
    }

    /// Insert one gallery record per uploaded file, all sharing one title.
    pub async fn insert_gallery_images(
        &self,
        uploaded: &[UploadedMedia],
        title: &str,
    ) -> Result<Vec<GalleryImage>, AppError> {
        let mut inserted = Vec::with_capacity(uploaded.len());

        for media in uploaded {
            let id = uuid::Uuid::new_v4().to_string();
            let now = Utc::now().to_rfc3339();

            sqlx::query(
                "INSERT INTO gallery (id, url, public_id, title, created_at) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&id)
            .bind(&media.url)
            .bind(&media.public_id)
            .bind(title)
            .bind(&now)
            .execute(&self.pool)
            .await?;

            inserted.push(GalleryImage {
                id,
                url: media.url.clone(),
                public_id: media.public_id.clone(),
                title: title.to_string(),
                created_at: now,
            });
        }

        Ok(inserted)
    }

    /// Delete a gallery image record.
    pub async fn delete_gallery_image(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Image not found".to_string()));
        }

        Ok(())
    }
}

/// Serialize an image URL list for storage.
fn images_to_json(images: &[String]) -> String {
    serde_json::to_string(images).unwrap_or_else(|_| "[]".to_string())
}

/// Map a database row to a Post.
fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> Post {
    let images_json: String = row.get("images");

    Post {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        date: row.get("date"),
        images: serde_json::from_str(&images_json).unwrap_or_default(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Map a database row to a GalleryImage.
fn gallery_from_row(row: &sqlx::sqlite::SqliteRow) -> GalleryImage {
    GalleryImage {
        id: row.get("id"),
        url: row.get("url"),
        public_id: row.get("public_id"),
        title: row.get("title"),
        created_at: row.get("created_at"),
    }
}
