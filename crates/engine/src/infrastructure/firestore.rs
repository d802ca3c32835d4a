//! Firestore item store (REST v1 documents API)
//!
//! Each item is one document in a fixed collection, the document id being the
//! item name and the only field `quantity`:
//!
//! ```text
//! projects/{project}/databases/{database}/documents/{collection}/{name}
//!   { "fields": { "quantity": { "integerValue": "3" } } }
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use pantry_domain::{Item, ItemName, Quantity};

use crate::infrastructure::ports::{ItemStore, StoreError};

/// Default Firestore REST endpoint.
pub const DEFAULT_FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Default database id.
pub const DEFAULT_FIRESTORE_DATABASE: &str = "(default)";

/// Default collection holding the items.
pub const DEFAULT_COLLECTION: &str = "inventory";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const QUANTITY_FIELD: &str = "quantity";

/// Documents requested per list page. The scan follows every page.
const LIST_PAGE_SIZE: u32 = 300;

/// Connection settings for [`FirestoreItemStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    pub collection: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl FirestoreConfig {
    /// Config for `project_id` with every other field at its default.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_FIRESTORE_BASE_URL.to_string(),
            project_id: project_id.into(),
            database: DEFAULT_FIRESTORE_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for one Firestore collection of item documents
#[derive(Clone)]
pub struct FirestoreItemStore {
    client: Client,
    collection_url: Url,
    api_key: Option<String>,
}

impl FirestoreItemStore {
    /// # Errors
    ///
    /// Returns `StoreError::Request` if the base URL cannot be parsed or
    /// cannot carry a path.
    pub fn new(config: &FirestoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            collection_url: collection_url(config)?,
            api_key: config.api_key.clone(),
        })
    }

    fn list_url(&self, page_token: Option<&str>) -> Url {
        let mut url = self.collection_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("pageSize", &LIST_PAGE_SIZE.to_string());
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }
        self.with_key(url)
    }

    fn document_url(&self, name: &ItemName) -> Result<Url, StoreError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::request("document_url", "base URL cannot carry a path"))?
            .push(name.as_str());
        Ok(self.with_key(url))
    }

    fn with_key(&self, mut url: Url) -> Url {
        if let Some(key) = &self.api_key {
            url.query_pairs_mut().append_pair("key", key);
        }
        url
    }
}

fn collection_url(config: &FirestoreConfig) -> Result<Url, StoreError> {
    let mut url = Url::parse(&config.base_url)
        .map_err(|e| StoreError::request("configure", format!("{}: {}", config.base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| {
            StoreError::request(
                "configure",
                format!("{} cannot be a base URL", config.base_url),
            )
        })?
        .pop_if_empty()
        .extend([
            "projects",
            config.project_id.as_str(),
            "databases",
            config.database.as_str(),
            "documents",
            config.collection.as_str(),
        ]);
    Ok(url)
}

/// Pass successful responses through, turn the rest into `StoreError::Status`.
async fn ensure_success(operation: &'static str, response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .map_err(|e| StoreError::request(operation, e))?;
    Err(StoreError::status(operation, status.as_u16(), body))
}

#[async_trait]
impl ItemStore for FirestoreItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let response = self
                .client
                .get(self.list_url(page_token.as_deref()))
                .send()
                .await
                .map_err(|e| StoreError::request("list", e))?;
            let page: ListDocumentsResponse = ensure_success("list", response)
                .await?
                .json()
                .await
                .map_err(StoreError::malformed)?;

            for document in &page.documents {
                match decode_document(document) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::warn!(
                            document = document.name.as_deref().unwrap_or("<unnamed>"),
                            error = %e,
                            "Skipping undecodable document"
                        );
                    }
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = items.len(), "Listed Firestore documents");
        Ok(items)
    }

    async fn get(&self, name: &ItemName) -> Result<Option<Quantity>, StoreError> {
        let response = self
            .client
            .get(self.document_url(name)?)
            .send()
            .await
            .map_err(|e| StoreError::request("get", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document: Document = ensure_success("get", response)
            .await?
            .json()
            .await
            .map_err(StoreError::malformed)?;
        decode_quantity(&document.fields).map(Some)
    }

    async fn put(&self, name: &ItemName, quantity: Quantity) -> Result<(), StoreError> {
        // PATCH without an update mask replaces every field of the document.
        let response = self
            .client
            .patch(self.document_url(name)?)
            .json(&encode_document(quantity))
            .send()
            .await
            .map_err(|e| StoreError::request("put", e))?;
        ensure_success("put", response).await?;
        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> Result<(), StoreError> {
        let response = self
            .client
            .delete(self.document_url(name)?)
            .send()
            .await
            .map_err(|e| StoreError::request("delete", e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        ensure_success("delete", response).await?;
        Ok(())
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    fields: HashMap<String, FieldValue>,
}

/// The subset of Firestore's `Value` union that can hold a quantity.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValue {
    /// int64 values travel as decimal strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    integer_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    double_value: Option<f64>,
}

fn encode_document(quantity: Quantity) -> Document {
    let value = FieldValue {
        integer_value: Some(serde_json::Value::String(quantity.to_string())),
        double_value: None,
    };
    Document {
        name: None,
        fields: HashMap::from([(QUANTITY_FIELD.to_string(), value)]),
    }
}

fn decode_quantity(fields: &HashMap<String, FieldValue>) -> Result<Quantity, StoreError> {
    let value = fields
        .get(QUANTITY_FIELD)
        .ok_or_else(|| StoreError::malformed("missing quantity field"))?;

    if let Some(raw) = &value.integer_value {
        let parsed = match raw {
            serde_json::Value::String(s) => s.parse::<i64>().ok(),
            other => other.as_i64(),
        };
        return parsed
            .map(Quantity::new)
            .ok_or_else(|| StoreError::malformed(format!("bad integerValue: {}", raw)));
    }

    // Written by clients that store JS numbers as doubles.
    match value.double_value {
        Some(d) if d.is_finite() => Ok(Quantity::new(d.trunc() as i64)),
        _ => Err(StoreError::malformed("quantity is not a number")),
    }
}

fn decode_document(document: &Document) -> Result<Item, StoreError> {
    let path = document
        .name
        .as_deref()
        .ok_or_else(|| StoreError::malformed("document without a name"))?;
    let id = path.rsplit('/').next().unwrap_or(path);
    let name = ItemName::new(id).map_err(|e| StoreError::malformed(format!("{}: {}", path, e)))?;
    Ok(Item::new(name, decode_quantity(&document.fields)?))
}
