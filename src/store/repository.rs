use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{DocumentStore, StoreError};

/// Typed access to one collection of the document store.
///
/// `find_by_id` is an equality query on the stored `id` field rather than a
/// key fetch; the hosted store only executes equality queries, and the
/// profile lookup depends on that exact shape.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    collection: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, collection: &'static str) -> Self {
        Self {
            store,
            collection,
            _record: PhantomData,
        }
    }

    pub async fn insert(&self, record: &T) -> Result<Uuid, StoreError> {
        self.store
            .insert(self.collection, serde_json::to_value(record)?)
            .await
    }

    pub async fn upsert(&self, id: Uuid, record: &T) -> Result<(), StoreError> {
        self.store
            .upsert(self.collection, id, serde_json::to_value(record)?)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let mut matches = self
            .find_all_where("id", &Value::String(id.to_string()))
            .await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.remove(0)))
        }
    }

    pub async fn find_all_where(&self, field: &str, value: &Value) -> Result<Vec<T>, StoreError> {
        let documents = self.store.query_equal(self.collection, field, value).await?;
        documents
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(StoreError::from))
            .collect()
    }
}
