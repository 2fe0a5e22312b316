//! Comment store backed by MongoDB
//!
//! Create/read/update/delete on individual comments. Update and delete are
//! ownership-scoped: the match filter requires both the document id and the
//! recorded owner email, and a `false` result never reveals whether the
//! comment was missing or owned by someone else.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::{Acknowledgment, WriteConcern};
use tracing::{debug, info};

use crate::db::schemas::{Comment, COMMENT_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::{MarqueeError, Result};

/// Comment store backed by MongoDB
pub struct CommentStore {
    collection: MongoCollection<Comment>,
}

impl CommentStore {
    /// Create a new comment store
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        let collection = mongo.collection::<Comment>(COMMENT_COLLECTION).await?;
        Ok(Self { collection })
    }

    /// Fetch a single comment by identifier. No ownership check; absence
    /// is `Ok(None)`, not an error.
    pub async fn get_comment(&self, id: &str) -> Result<Option<Comment>> {
        let oid = parse_comment_id(id)?;
        self.collection.find_one(doc! { "_id": oid }).await
    }

    /// Insert a new comment.
    ///
    /// The write goes out under w:1 acknowledgment. User comments are a
    /// high-volume, low-criticality write path, so a single-node ack is
    /// traded for throughput; callers must read success as "accepted",
    /// not "survived a node failure".
    ///
    /// Fails with [`MarqueeError::InvalidOperation`] when the comment id
    /// is empty or malformed, and with [`MarqueeError::WriteConflict`]
    /// when the id already exists.
    pub async fn add_comment(&self, comment: Comment) -> Result<Comment> {
        validate_new_comment(&comment)?;

        let id = self
            .collection
            .insert_one(comment.clone(), Some(relaxed_write_concern()))
            .await?;

        info!("Inserted comment {} by {}", id.to_hex(), comment.email);
        Ok(comment)
    }

    /// Update the text of a comment owned by `email`.
    ///
    /// Returns `Ok(true)` only when exactly one document matched the
    /// compound id+owner filter. `Ok(false)` covers "no such comment" and
    /// "owned by someone else" alike; the two are intentionally
    /// indistinguishable at this layer.
    pub async fn update_comment(
        &self,
        comment_id: &str,
        text: &str,
        email: &str,
    ) -> Result<bool> {
        let oid = parse_comment_id(comment_id)?;

        let matched = self
            .collection
            .update_one(ownership_filter(oid, email), text_update(text))
            .await?;

        debug!(
            "Update of comment {} by {}: matched {}",
            comment_id, email, matched
        );
        Ok(matched == 1)
    }

    /// Delete a comment owned by `email`.
    ///
    /// Same compound-match discipline as update: `Ok(true)` iff exactly
    /// one document was removed.
    pub async fn delete_comment(&self, comment_id: &str, email: &str) -> Result<bool> {
        let oid = parse_comment_id(comment_id)?;

        let deleted = self
            .collection
            .delete_one(ownership_filter(oid, email))
            .await?;

        debug!(
            "Delete of comment {} by {}: removed {}",
            comment_id, email, deleted
        );
        Ok(deleted == 1)
    }
}

/// w:1 — acknowledged by a single node, not a majority
pub(crate) fn relaxed_write_concern() -> WriteConcern {
    WriteConcern::builder().w(Acknowledgment::Nodes(1)).build()
}

/// Reject comments without an identifier before any write is attempted
fn validate_new_comment(comment: &Comment) -> Result<()> {
    if comment.id.is_empty() {
        return Err(MarqueeError::InvalidOperation("No comment id".into()));
    }
    parse_comment_id(&comment.id)?;
    Ok(())
}

/// Parse an identifier string, failing fast on malformed input so callers
/// can tell "bad input" from "not found / no permission"
fn parse_comment_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|e| MarqueeError::InvalidOperation(format!("Malformed comment id '{}': {}", id, e)))
}

/// Compound match on document identity AND recorded owner
fn ownership_filter(id: ObjectId, email: &str) -> Document {
    doc! { "_id": id, "email": email }
}

/// Field-level set of `text`; every other field stays untouched
fn text_update(text: &str) -> Document {
    doc! { "$set": { "text": text } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_id_is_rejected() {
        let mut comment = Comment::new("ada@example.com", ObjectId::new().to_hex(), "hi");
        comment.id = String::new();

        let err = validate_new_comment(&comment).unwrap_err();
        assert!(matches!(err, MarqueeError::InvalidOperation(_)));
    }

    #[test]
    fn test_malformed_id_is_rejected() {
        let mut comment = Comment::new("ada@example.com", ObjectId::new().to_hex(), "hi");
        comment.id = "not-a-hex-object-id".into();

        let err = validate_new_comment(&comment).unwrap_err();
        assert!(matches!(err, MarqueeError::InvalidOperation(_)));
    }

    #[test]
    fn test_well_formed_comment_passes_validation() {
        let comment = Comment::new("ada@example.com", ObjectId::new().to_hex(), "hi");
        assert!(validate_new_comment(&comment).is_ok());
    }

    #[test]
    fn test_parse_comment_id_accepts_hex() {
        let oid = ObjectId::new();
        assert_eq!(parse_comment_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn test_parse_comment_id_fails_fast() {
        for bad in ["", "xyz", "123", "5a9427648b0beebeb6957a2"] {
            let err = parse_comment_id(bad).unwrap_err();
            assert!(matches!(err, MarqueeError::InvalidOperation(_)), "{}", bad);
        }
    }

    #[test]
    fn test_ownership_filter_requires_both_id_and_email() {
        let oid = ObjectId::new();
        let filter = ownership_filter(oid, "ada@example.com");

        assert_eq!(filter.get_object_id("_id").unwrap(), oid);
        assert_eq!(filter.get_str("email").unwrap(), "ada@example.com");
        assert_eq!(filter.len(), 2);
    }

    #[test]
    fn test_text_update_sets_only_text() {
        let update = text_update("hello");
        let set = update.get_document("$set").unwrap();

        assert_eq!(set.get_str("text").unwrap(), "hello");
        assert_eq!(set.len(), 1);
        assert_eq!(update.len(), 1);
    }

    #[test]
    fn test_relaxed_write_concern_is_single_node() {
        let wc = relaxed_write_concern();
        assert_eq!(wc.w, Some(Acknowledgment::Nodes(1)));
    }
}
