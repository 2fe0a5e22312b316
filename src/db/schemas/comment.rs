//! Comment document schema
//!
//! A user-authored text record attached to a movie and owned by an email
//! identity. The email is the ownership key for every mutation.

use bson::{doc, oid::ObjectId, serde_helpers::hex_string_as_object_id, DateTime, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for comments
pub const COMMENT_COLLECTION: &str = "comments";

/// Comment document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Comment {
    /// Document ID, carried as the hex form of the `_id` ObjectId.
    /// Assigned once before insert and never changed.
    #[serde(rename = "_id", with = "hex_string_as_object_id")]
    pub id: String,

    /// Authoring user's email; the ownership key for update and delete
    pub email: String,

    /// Referenced movie (owned by the external catalog; never validated here)
    #[serde(with = "hex_string_as_object_id")]
    pub movie_id: String,

    /// Free-form comment body; the only field updates may change
    pub text: String,

    /// Timestamp set by the caller on write
    pub date: DateTime,
}

impl Comment {
    /// Create a new comment with a freshly generated identifier
    pub fn new(
        email: impl Into<String>,
        movie_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: ObjectId::new().to_hex(),
            email: email.into(),
            movie_id: movie_id.into(),
            text: text.into(),
            date: DateTime::now(),
        }
    }
}

impl IntoIndexes for Comment {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Ownership filters and the activity report both match on email
            (
                doc! { "email": 1 },
                Some(IndexOptions::builder().name("email_index".to_string()).build()),
            ),
            // Per-movie listing by the web layer
            (
                doc! { "movie_id": 1 },
                Some(
                    IndexOptions::builder()
                        .name("movie_id_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_serializes_id_as_object_id() {
        let comment = Comment::new("ada@example.com", ObjectId::new().to_hex(), "loved it");

        let doc = bson::to_document(&comment).unwrap();
        let stored_id = doc.get_object_id("_id").unwrap();
        assert_eq!(stored_id.to_hex(), comment.id);
        assert_eq!(doc.get_str("email").unwrap(), "ada@example.com");
        assert_eq!(doc.get_str("text").unwrap(), "loved it");
    }

    #[test]
    fn test_comment_bson_round_trip() {
        let comment = Comment::new("ada@example.com", ObjectId::new().to_hex(), "loved it");

        let doc = bson::to_document(&comment).unwrap();
        let back: Comment = bson::from_document(doc).unwrap();
        assert_eq!(back, comment);
    }

    #[test]
    fn test_new_comments_get_distinct_ids() {
        let movie = ObjectId::new().to_hex();
        let a = Comment::new("ada@example.com", movie.clone(), "first");
        let b = Comment::new("ada@example.com", movie, "second");
        assert_ne!(a.id, b.id);
    }
}
