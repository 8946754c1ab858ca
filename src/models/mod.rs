//! Data models for the temple CMS.
//!
//! Wire shapes keep the Mongo-style `_id` field names the frontend already
//! depends on, with camelCase for everything else.

mod gallery;
mod post;

pub use gallery::*;
pub use post::*;
