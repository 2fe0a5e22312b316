//! Database schemas for Marquee
//!
//! Defines the MongoDB document structure for comments.

mod comment;

pub use comment::{Comment, COMMENT_COLLECTION};
