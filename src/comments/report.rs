//! Most-active-commenters report
//!
//! Groups the whole comment collection by author email and ranks by comment
//! count. The report feeds moderation and ranking decisions, so it reads
//! under majority read concern: rows never reflect writes that could still
//! be rolled back, unlike the w:1 insert path.

use bson::{doc, Document};
use futures_util::{Stream, StreamExt};
use mongodb::options::ReadConcern;
use serde::{Deserialize, Serialize};

use crate::db::schemas::{Comment, COMMENT_COLLECTION};
use crate::db::{MongoClient, MongoCollection};
use crate::types::{MarqueeError, Result};

/// Maximum number of commenters in a report
pub const REPORT_LIMIT: i32 = 20;

/// A ranking entry: one commenter and their comment count at report time.
///
/// Derived output only; critics are never persisted.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Critic {
    /// The commenter's email, reused as identity
    #[serde(rename(deserialize = "_id"))]
    pub id: String,

    /// Number of comments attributed to that email
    #[serde(rename(deserialize = "count"))]
    pub num_comments: i64,
}

/// Activity reporter over the comment collection
pub struct ActivityReporter {
    collection: MongoCollection<Comment>,
}

impl ActivityReporter {
    /// Create a new activity reporter
    pub async fn new(mongo: &MongoClient) -> Result<Self> {
        let collection = mongo.collection::<Comment>(COMMENT_COLLECTION).await?;
        Ok(Self { collection })
    }

    /// Rank commenters by comment count, descending, capped at
    /// [`REPORT_LIMIT`]. Ties break by email ascending so output order is
    /// deterministic.
    ///
    /// Returns the aggregation cursor as a lazy, consume-once stream; no
    /// side effects.
    pub async fn most_active_commenters(
        &self,
    ) -> Result<impl Stream<Item = Result<Critic>>> {
        let cursor = self
            .collection
            .aggregate(report_pipeline(), Some(ReadConcern::majority()))
            .await?;

        Ok(cursor.map(|row| {
            row.map_err(|e| MarqueeError::Database(format!("Report cursor failed: {}", e)))
                .and_then(|doc| {
                    bson::from_document::<Critic>(doc)
                        .map_err(|e| MarqueeError::Database(format!("Malformed report row: {}", e)))
                })
        }))
    }
}

/// Group by email, count per group, order by count descending (email
/// ascending among equal counts), truncate to the top 20
fn report_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$email", "count": { "$sum": 1 } } },
        doc! { "$sort": { "count": -1, "_id": 1 } },
        doc! { "$limit": REPORT_LIMIT },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_groups_by_email_with_count() {
        let pipeline = report_pipeline();
        assert_eq!(pipeline.len(), 3);

        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get_str("_id").unwrap(), "$email");
        let count = group.get_document("count").unwrap();
        assert_eq!(count.get_i32("$sum").unwrap(), 1);
    }

    #[test]
    fn test_pipeline_sorts_by_count_then_email() {
        let pipeline = report_pipeline();

        let sort = pipeline[1].get_document("$sort").unwrap();
        let keys: Vec<&str> = sort.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["count", "_id"]);
        assert_eq!(sort.get_i32("count").unwrap(), -1);
        assert_eq!(sort.get_i32("_id").unwrap(), 1);
    }

    #[test]
    fn test_pipeline_caps_at_twenty() {
        let pipeline = report_pipeline();
        assert_eq!(pipeline[2].get_i32("$limit").unwrap(), 20);
    }

    #[test]
    fn test_critic_deserializes_from_group_row() {
        let row = doc! { "_id": "ada@example.com", "count": 10i64 };

        let critic: Critic = bson::from_document(row).unwrap();
        assert_eq!(critic.id, "ada@example.com");
        assert_eq!(critic.num_comments, 10);
    }

    #[test]
    fn test_critic_serializes_with_field_names() {
        let critic = Critic {
            id: "ada@example.com".into(),
            num_comments: 10,
        };

        let json = serde_json::to_value(&critic).unwrap();
        assert_eq!(json["id"], "ada@example.com");
        assert_eq!(json["num_comments"], 10);
    }
}
