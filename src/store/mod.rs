mod http;
mod memory;
mod repository;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use repository::Repository;

/// Collection names in the hosted document store. These are part of the
/// external contract; `query_equal` field names target the documents as
/// stored, camelCase included.
pub mod collections {
    pub const USERS: &str = "users";
    pub const BOOKINGS: &str = "bookings";
    pub const CONTACT_REQUESTS: &str = "contactRequests";
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store transport error: {0}")]
    Transport(String),

    #[error("Store rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Client contract of the hosted document store.
///
/// The store offers no transactions and no joins; `query_equal` is the only
/// query shape it executes. Every richer view in this service is assembled
/// client-side from these calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, letting the store assign its id.
    async fn insert(&self, collection: &str, record: Value) -> Result<Uuid, StoreError>;

    /// Create or replace the document stored under `id`.
    async fn upsert(&self, collection: &str, id: Uuid, record: Value) -> Result<(), StoreError>;

    /// All documents whose `field` equals `value`, in storage order.
    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Value>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
