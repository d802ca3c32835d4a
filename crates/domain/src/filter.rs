//! Name search over a display list.

use crate::entities::Item;

/// Returns the entries whose name contains `term`, ignoring case.
///
/// Both sides are lower-cased before comparison. An empty term keeps every
/// entry. Order is preserved, and applying the same term twice gives the
/// same result as applying it once.
pub fn filter_items(items: &[Item], term: &str) -> Vec<Item> {
    if term.is_empty() {
        return items.to_vec();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| item.name.as_str().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemName, Quantity};

    fn item(name: &str, quantity: i64) -> Item {
        Item::new(ItemName::new(name).unwrap(), Quantity::new(quantity))
    }

    fn pantry() -> Vec<Item> {
        vec![
            item("apple", 2),
            item("banana", 1),
            item("Green Beans", 4),
            item("rice", 10),
        ]
    }

    #[test]
    fn empty_term_returns_list_unchanged() {
        assert_eq!(filter_items(&pantry(), ""), pantry());
    }

    #[test]
    fn matches_case_insensitively() {
        let result = filter_items(&pantry(), "AN");
        assert_eq!(result, vec![item("banana", 1), item("Green Beans", 4)]);
    }

    #[test]
    fn upper_case_names_match_lower_case_terms() {
        let result = filter_items(&pantry(), "green");
        assert_eq!(result, vec![item("Green Beans", 4)]);
    }

    #[test]
    fn no_match_returns_empty() {
        assert!(filter_items(&pantry(), "flour").is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        for term in ["", "a", "AN", "rice", "zz", " "] {
            let once = filter_items(&pantry(), term);
            let twice = filter_items(&once, term);
            assert_eq!(once, twice, "term {term:?}");
        }
    }

    #[test]
    fn only_banana_contains_an_among_apple_and_banana() {
        let list = vec![item("apple", 2), item("banana", 1)];
        assert_eq!(filter_items(&list, "AN"), vec![item("banana", 1)]);
    }

    #[test]
    fn does_not_touch_input() {
        let list = pantry();
        let _ = filter_items(&list, "apple");
        assert_eq!(list, pantry());
    }
}
