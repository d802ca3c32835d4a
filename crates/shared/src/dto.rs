//! Data transfer objects for items and inventory snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_domain::{DisplayList, Item};

/// One row of the inventory list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDto {
    pub name: String,
    pub quantity: i64,
    /// Name with its first character upper-cased
    pub label: String,
}

impl From<&Item> for ItemDto {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.to_string(),
            quantity: item.quantity.value(),
            label: item.label(),
        }
    }
}

/// A published inventory snapshot, optionally narrowed by a search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDto {
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Search term applied to `items`, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub items: Vec<ItemDto>,
}

impl InventoryDto {
    /// Full snapshot, no search applied.
    pub fn from_list(list: &DisplayList) -> Self {
        Self {
            version: list.version,
            refreshed_at: list.refreshed_at,
            search: None,
            items: list.items.iter().map(ItemDto::from).collect(),
        }
    }

    /// Snapshot narrowed to names containing `term`, ignoring case.
    pub fn filtered(list: &DisplayList, term: &str) -> Self {
        Self {
            version: list.version,
            refreshed_at: list.refreshed_at,
            search: (!term.is_empty()).then(|| term.to_string()),
            items: list.filtered(term).iter().map(ItemDto::from).collect(),
        }
    }
}

impl From<&DisplayList> for InventoryDto {
    fn from(list: &DisplayList) -> Self {
        Self::from_list(list)
    }
}
