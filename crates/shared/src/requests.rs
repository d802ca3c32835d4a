//! REST request bodies and query strings

use serde::{Deserialize, Serialize};

/// Body of `POST /api/items`.
///
/// `quantity` defaults to 1 when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// Body of `PUT /api/items/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i64,
}

/// Query string of `GET /api/items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItemsQuery {
    #[serde(default)]
    pub search: Option<String>,
}
