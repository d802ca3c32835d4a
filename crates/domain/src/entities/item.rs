//! Item entity - a named quantity in the pantry
//!
//! One remote document per item, keyed by name:
//!
//! ```text
//! inventory/{name} => { quantity: <integer> }
//! ```

use serde::{Deserialize, Serialize};

use crate::value_objects::{ItemName, Quantity};

/// A stored item as read back from the remote collection.
///
/// Plain data struct: the name invariant lives in `ItemName`, and any
/// quantity is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: ItemName,
    pub quantity: Quantity,
}

impl Item {
    pub fn new(name: ItemName, quantity: Quantity) -> Self {
        Self { name, quantity }
    }

    /// Name with its first character upper-cased, for list rendering.
    pub fn label(&self) -> String {
        let mut chars = self.name.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: i64) -> Item {
        Item::new(ItemName::new(name).unwrap(), Quantity::new(quantity))
    }

    #[test]
    fn test_label_capitalizes_first_char() {
        assert_eq!(item("apple", 1).label(), "Apple");
        assert_eq!(item("Banana", 1).label(), "Banana");
        assert_eq!(item("éclair", 1).label(), "Éclair");
    }

    #[test]
    fn test_label_leaves_name_untouched() {
        let item = item("apple pie", 2);
        let _ = item.label();
        assert_eq!(item.name.as_str(), "apple pie");
    }
}
