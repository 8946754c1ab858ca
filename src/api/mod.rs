//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod gallery;
mod posts;

pub use gallery::*;
pub use posts::*;

use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;

/// Handler result: success JSON body or a uniform `{error}` response.
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Query parameters for the public list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// When present, image URLs are rewritten for responsive delivery
    /// at this width.
    pub width: Option<u32>,
}
