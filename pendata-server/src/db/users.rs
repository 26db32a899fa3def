//! Read and write operations over the user collection.

use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::{
    DeleteOneModel, InsertOneModel, UpdateModifications, UpdateOneModel, WriteModel,
};
use mongodb::Namespace;
use serde::{Deserialize, Serialize};

use super::store::{Handle, StoreError};

/// One write in a bulk batch.
///
/// Descriptors are data, not hard-coded calls: [`UserRepo::bulk_write`]
/// executes any sequence, and [`default_batch`] reproduces the fixed one the
/// `/bulk` endpoint runs.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOp {
    InsertOne { document: Document },
    UpdateOne { filter: Document, update: Document },
    DeleteOne { filter: Document },
}

impl BulkOp {
    fn into_model(self, namespace: &Namespace) -> WriteModel {
        match self {
            BulkOp::InsertOne { document } => InsertOneModel::builder()
                .namespace(namespace.clone())
                .document(document)
                .build()
                .into(),
            BulkOp::UpdateOne { filter, update } => UpdateOneModel::builder()
                .namespace(namespace.clone())
                .filter(filter)
                .update(UpdateModifications::Document(update))
                .build()
                .into(),
            BulkOp::DeleteOne { filter } => DeleteOneModel::builder()
                .namespace(namespace.clone())
                .filter(filter)
                .build()
                .into(),
        }
    }
}

/// The insert/update/delete sequence the `/bulk` endpoint runs.
///
/// Net effect on a collection containing neither email: one surviving User1
/// document with alamat "Alamat Baru", and no User2 document.
pub fn default_batch() -> Vec<BulkOp> {
    vec![
        BulkOp::InsertOne {
            document: doc! { "nama": "User1", "email": "user1@gmail.com", "alamat": "Alamat1" },
        },
        BulkOp::InsertOne {
            document: doc! { "nama": "User2", "email": "user2@gmail.com", "alamat": "Alamat2" },
        },
        BulkOp::UpdateOne {
            filter: doc! { "email": "user1@gmail.com" },
            update: doc! { "$set": { "alamat": "Alamat Baru" } },
        },
        BulkOp::DeleteOne {
            filter: doc! { "email": "user2@gmail.com" },
        },
    ]
}

/// One aggregation group: an alamat value and how many users share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlamatGroup {
    /// Group key; `None` for documents without an alamat field.
    #[serde(rename = "_id")]
    pub alamat: Option<String>,

    #[serde(rename = "totalUsers")]
    pub total_users: i64,
}

/// Effect counts reported by the store for one bulk batch.
///
/// Serialized camelCase to match the wire driver's result object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSummary {
    pub inserted_count: i64,
    pub matched_count: i64,
    pub modified_count: i64,
    pub deleted_count: i64,
    pub upserted_count: i64,
}

fn alamat_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$alamat", "totalUsers": { "$sum": 1 } } },
        doc! { "$sort": { "totalUsers": -1 } },
    ]
}

/// Repository over the user collection.
pub struct UserRepo<'a> {
    handle: &'a Handle,
}

impl<'a> UserRepo<'a> {
    pub fn new(handle: &'a Handle) -> Self {
        Self { handle }
    }

    /// Every document in the collection, in cursor order.
    pub async fn list(&self) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .handle
            .collection
            .find(doc! {})
            .await
            .map_err(StoreError::Query)?;

        cursor.try_collect().await.map_err(StoreError::Query)
    }

    /// Users grouped by alamat, largest group first.
    pub async fn group_by_alamat(&self) -> Result<Vec<AlamatGroup>, StoreError> {
        let cursor = self
            .handle
            .collection
            .aggregate(alamat_pipeline())
            .with_type::<AlamatGroup>()
            .await
            .map_err(StoreError::Aggregation)?;

        cursor.try_collect().await.map_err(StoreError::Aggregation)
    }

    /// Submit an ordered batch in a single call and return the store's
    /// effect summary.
    pub async fn bulk_write(&self, ops: &[BulkOp]) -> Result<BulkSummary, StoreError> {
        let namespace = self.handle.collection.namespace();
        let models: Vec<WriteModel> = ops
            .iter()
            .cloned()
            .map(|op| op.into_model(&namespace))
            .collect();

        let result = self
            .handle
            .client
            .bulk_write(models)
            .await
            .map_err(StoreError::Write)?;

        Ok(BulkSummary {
            inserted_count: result.inserted_count,
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            deleted_count: result.deleted_count,
            upserted_count: result.upserted_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::{Store, StoreConfig};
    use mongodb::bson::{from_document, Bson};

    #[test]
    fn default_batch_matches_fixed_sequence() {
        let batch = default_batch();
        assert_eq!(batch.len(), 4);

        assert_eq!(
            batch[0],
            BulkOp::InsertOne {
                document: doc! { "nama": "User1", "email": "user1@gmail.com", "alamat": "Alamat1" },
            }
        );
        assert_eq!(
            batch[1],
            BulkOp::InsertOne {
                document: doc! { "nama": "User2", "email": "user2@gmail.com", "alamat": "Alamat2" },
            }
        );
        assert_eq!(
            batch[2],
            BulkOp::UpdateOne {
                filter: doc! { "email": "user1@gmail.com" },
                update: doc! { "$set": { "alamat": "Alamat Baru" } },
            }
        );
        assert_eq!(
            batch[3],
            BulkOp::DeleteOne {
                filter: doc! { "email": "user2@gmail.com" },
            }
        );
    }

    #[test]
    fn pipeline_groups_then_sorts_descending() {
        let pipeline = alamat_pipeline();
        assert_eq!(
            pipeline,
            vec![
                doc! { "$group": { "_id": "$alamat", "totalUsers": { "$sum": 1 } } },
                doc! { "$sort": { "totalUsers": -1 } },
            ]
        );
    }

    #[test]
    fn group_deserializes_from_store_output() {
        let group: AlamatGroup =
            from_document(doc! { "_id": "Alamat1", "totalUsers": 2 }).unwrap();
        assert_eq!(group.alamat.as_deref(), Some("Alamat1"));
        assert_eq!(group.total_users, 2);

        // Documents missing the field group under a null key.
        let group: AlamatGroup =
            from_document(doc! { "_id": Bson::Null, "totalUsers": 1 }).unwrap();
        assert_eq!(group.alamat, None);
    }

    #[test]
    fn group_serializes_with_wire_field_names() {
        let group = AlamatGroup {
            alamat: Some("Alamat1".to_string()),
            total_users: 3,
        };
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value, serde_json::json!({ "_id": "Alamat1", "totalUsers": 3 }));
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = BulkSummary {
            inserted_count: 2,
            matched_count: 1,
            modified_count: 1,
            deleted_count: 1,
            upserted_count: 0,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "insertedCount": 2,
                "matchedCount": 1,
                "modifiedCount": 1,
                "deletedCount": 1,
                "upsertedCount": 0,
            })
        );
    }

    // Integration tests require a real store.
    // Run with: MONGODB_URL=mongodb://... cargo test -p pendata-server -- --ignored

    fn test_store(collection: &str) -> Store {
        Store::new(StoreConfig {
            url: std::env::var("MONGODB_URL").expect("MONGODB_URL required"),
            database: "pendata_test".to_string(),
            collection: collection.to_string(),
            server_selection_timeout: None,
        })
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bulk_default_batch_end_state() {
        let store = test_store("pengguna_bulk");
        let handle = store.handle().await.expect("connect failed");
        let repo = UserRepo::new(handle);

        // Start from a collection containing neither batch email.
        handle
            .collection
            .delete_many(doc! {
                "email": { "$in": ["user1@gmail.com", "user2@gmail.com"] }
            })
            .await
            .expect("cleanup failed");

        let summary = repo.bulk_write(&default_batch()).await.expect("bulk failed");
        assert_eq!(summary.inserted_count, 2);
        assert_eq!(summary.matched_count, 1);
        assert_eq!(summary.modified_count, 1);
        assert_eq!(summary.deleted_count, 1);

        let user1 = handle
            .collection
            .find_one(doc! { "email": "user1@gmail.com" })
            .await
            .expect("find failed")
            .expect("user1 missing");
        assert_eq!(user1.get_str("alamat").unwrap(), "Alamat Baru");

        let user2 = handle
            .collection
            .find_one(doc! { "email": "user2@gmail.com" })
            .await
            .expect("find failed");
        assert!(user2.is_none());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn aggregation_counts_cover_every_document() {
        let store = test_store("pengguna_agg");
        let handle = store.handle().await.expect("connect failed");
        let repo = UserRepo::new(handle);

        handle
            .collection
            .delete_many(doc! {})
            .await
            .expect("cleanup failed");
        handle
            .collection
            .insert_many(vec![
                doc! { "nama": "A", "email": "a@x", "alamat": "Alamat1" },
                doc! { "nama": "B", "email": "b@x", "alamat": "Alamat1" },
                doc! { "nama": "C", "email": "c@x", "alamat": "Alamat2" },
            ])
            .await
            .expect("seed failed");

        let groups = repo.group_by_alamat().await.expect("aggregation failed");

        let total: i64 = groups.iter().map(|g| g.total_users).sum();
        assert_eq!(total, repo.list().await.expect("list failed").len() as i64);

        // Sorted by count, largest group first.
        assert!(groups.windows(2).all(|w| w[0].total_users >= w[1].total_users));
        assert_eq!(groups[0].alamat.as_deref(), Some("Alamat1"));
        assert_eq!(groups[0].total_users, 2);
    }
}
