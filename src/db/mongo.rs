//! MongoDB client and collection wrapper
//!
//! Thin typed layer over the driver. Consistency levels (write concern on
//! inserts, read concern on aggregations) are explicit per-operation
//! parameters rather than client-wide settings, so the high-volume comment
//! write path and the report read path can diverge independently.

use bson::{doc, oid::ObjectId, Document};
use mongodb::{
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReadConcern, WriteConcern},
    Client, Collection, Cursor, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::types::{MarqueeError, Result};

/// Trait for schemas that provide index definitions
pub trait IntoIndexes {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)>;
}

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Create a new MongoDB client
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        // Use serverSelectionTimeoutMS to avoid hanging on unreachable MongoDB
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri)
            .await
            .map_err(|e| MarqueeError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        // Verify connection with timeout
        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| MarqueeError::Database(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB database '{}'", db_name);

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Get a typed collection
    pub async fn collection<T>(&self, name: &str) -> Result<MongoCollection<T>>
    where
        T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
    {
        MongoCollection::new(&self.client, &self.db_name, name).await
    }

    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the database name
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

/// Typed MongoDB collection with automatic indexing
#[derive(Debug, Clone)]
pub struct MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    inner: Collection<T>,
}

impl<T> MongoCollection<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + IntoIndexes,
{
    /// Create a new collection and apply indexes
    pub async fn new(client: &Client, db_name: &str, collection_name: &str) -> Result<Self> {
        let collection = client.database(db_name).collection::<T>(collection_name);
        let mongo_collection = MongoCollection { inner: collection };

        // Apply indexes
        mongo_collection.apply_indexes().await?;

        Ok(mongo_collection)
    }

    /// Apply schema-defined indexes
    async fn apply_indexes(&self) -> Result<()> {
        let schema_indices = T::into_indices();

        if schema_indices.is_empty() {
            return Ok(());
        }

        let indices: Vec<IndexModel> = schema_indices
            .into_iter()
            .map(|(keys, opts)| IndexModel::builder().keys(keys).options(opts).build())
            .collect();

        self.inner
            .create_indexes(indices)
            .await
            .map_err(|e| MarqueeError::Database(format!("Failed to create indexes: {}", e)))?;

        Ok(())
    }

    /// Insert a document, optionally under a caller-chosen write concern.
    ///
    /// A duplicate `_id` surfaces as [`MarqueeError::WriteConflict`] so
    /// callers can tell it apart from validation failures.
    pub async fn insert_one(
        &self,
        item: T,
        write_concern: Option<WriteConcern>,
    ) -> Result<ObjectId> {
        let mut action = self.inner.insert_one(item);
        if let Some(wc) = write_concern {
            action = action.write_concern(wc);
        }

        let result = action.await.map_err(|e| {
            if is_duplicate_key(&e) {
                MarqueeError::WriteConflict(format!("Duplicate document id: {}", e))
            } else {
                MarqueeError::Database(format!("Insert failed: {}", e))
            }
        })?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| MarqueeError::Database("Failed to get inserted ID".into()))
    }

    /// Find one document by filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        self.inner
            .find_one(filter)
            .await
            .map_err(|e| MarqueeError::Database(format!("Find failed: {}", e)))
    }

    /// Update one document; returns how many documents matched the filter
    pub async fn update_one(&self, filter: Document, update: Document) -> Result<u64> {
        let result = self
            .inner
            .update_one(filter, update)
            .await
            .map_err(|e| MarqueeError::Database(format!("Update failed: {}", e)))?;

        Ok(result.matched_count)
    }

    /// Delete one document; returns how many documents were removed
    pub async fn delete_one(&self, filter: Document) -> Result<u64> {
        let result = self
            .inner
            .delete_one(filter)
            .await
            .map_err(|e| MarqueeError::Database(format!("Delete failed: {}", e)))?;

        Ok(result.deleted_count)
    }

    /// Run an aggregation pipeline, optionally under a caller-chosen read
    /// concern. Returns the raw document cursor; callers deserialize.
    pub async fn aggregate(
        &self,
        pipeline: Vec<Document>,
        read_concern: Option<ReadConcern>,
    ) -> Result<Cursor<Document>> {
        let mut action = self.inner.aggregate(pipeline);
        if let Some(rc) = read_concern {
            action = action.read_concern(rc);
        }

        action
            .await
            .map_err(|e| MarqueeError::Database(format!("Aggregation failed: {}", e)))
    }

    /// Get the underlying collection for advanced operations
    pub fn inner(&self) -> &Collection<T> {
        &self.inner
    }
}

/// Duplicate-key write errors (server code 11000) mean the `_id` already
/// exists in the collection.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref write_err)) => write_err.code == 11000,
        _ => false,
    }
}
