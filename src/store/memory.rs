use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, StoreError};

/// In-process document store. The development default, and the test double
/// behind every view-layer test.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn with_id(mut record: Value, id: Uuid) -> Result<Value, StoreError> {
    match record.as_object_mut() {
        Some(map) => {
            map.insert("id".to_string(), Value::String(id.to_string()));
            Ok(record)
        }
        None => Err(StoreError::Rejected {
            status: 422,
            message: "document must be a JSON object".to_string(),
        }),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, record: Value) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let record = with_id(record, id)?;
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(record);
        Ok(id)
    }

    async fn upsert(&self, collection: &str, id: Uuid, record: Value) -> Result<(), StoreError> {
        let record = with_id(record, id)?;
        let id_value = Value::String(id.to_string());
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|doc| doc.get("id") == Some(&id_value)) {
            Some(existing) => *existing = record,
            None => documents.push(record),
        }
        Ok(())
    }

    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        let matches = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| doc.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(matches)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_an_id_and_query_finds_it() {
        let store = MemoryStore::new();
        let id = store
            .insert("users", json!({"name": "Ann", "role": "tutor"}))
            .await
            .unwrap();

        let matches = store
            .query_equal("users", "id", &json!(id.to_string()))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["name"], "Ann");
    }

    #[tokio::test]
    async fn upsert_replaces_the_existing_document() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        store.upsert("users", id, json!({"name": "Ann"})).await.unwrap();
        store.upsert("users", id, json!({"name": "Ann Lee"})).await.unwrap();

        let matches = store
            .query_equal("users", "id", &json!(id.to_string()))
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["name"], "Ann Lee");
    }

    #[tokio::test]
    async fn query_on_a_missing_collection_is_empty_not_an_error() {
        let store = MemoryStore::new();
        let matches = store
            .query_equal("bookings", "tutorId", &json!("nobody"))
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn non_object_documents_are_rejected() {
        let store = MemoryStore::new();
        let err = store.insert("users", json!("just a string")).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 422, .. }));
    }
}
