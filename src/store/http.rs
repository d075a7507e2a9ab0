use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::{DocumentStore, StoreError};

/// Client of the hosted document API.
///
/// One endpoint family per contract operation:
/// `POST /collections/{name}/documents`, `PUT .../documents/{id}`,
/// `GET .../documents?field=&value=` (value JSON-encoded), `GET /health`.
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct InsertResponse {
    id: Uuid,
}

impl HttpStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if !self.api_key.is_empty() {
            builder = builder.header("x-api-key", &self.api_key);
        }
        builder
    }
}

async fn checked(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn insert(&self, collection: &str, record: Value) -> Result<Uuid, StoreError> {
        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/collections/{}/documents", collection),
            )
            .json(&record)
            .send()
            .await?;
        let body: InsertResponse = checked(response).await?.json().await?;
        Ok(body.id)
    }

    async fn upsert(&self, collection: &str, id: Uuid, record: Value) -> Result<(), StoreError> {
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/collections/{}/documents/{}", collection, id),
            )
            .json(&record)
            .send()
            .await?;
        checked(response).await?;
        Ok(())
    }

    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .request(
                reqwest::Method::GET,
                &format!("/collections/{}/documents", collection),
            )
            .query(&[("field", field), ("value", &value.to_string())])
            .send()
            .await?;
        let documents: Vec<Value> = checked(response).await?.json().await?;
        Ok(documents)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        checked(response).await?;
        Ok(())
    }
}
