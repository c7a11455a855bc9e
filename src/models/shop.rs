// Shop model representing a node that stocks items and charges a queue penalty

use crate::models::{Cost, ItemId, Location, ShopId};
use std::collections::BTreeSet;

/// Represents a shop where items can be purchased
#[derive(Debug, Clone, PartialEq)]
pub struct Shop {
    /// Unique identifier for the shop (never 0, which denotes the start)
    pub id: ShopId,

    /// Position of the shop
    pub location: Location,

    /// Items stocked by this shop
    pub items: BTreeSet<ItemId>,

    /// Penalty added once when the shop is visited
    pub queue_penalty: Cost,
}

impl Shop {
    /// Creates a new shop with the given ID, location, inventory and queue penalty
    pub fn new<I>(id: ShopId, location: Location, items: I, queue_penalty: Cost) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        Self {
            id,
            location,
            items: items.into_iter().collect(),
            queue_penalty,
        }
    }

    /// Checks if the shop stocks a specific item
    pub fn has_item(&self, item: &ItemId) -> bool {
        self.items.contains(item)
    }

    /// Items of `wanted` that can be bought here
    pub fn fulfils(&self, wanted: &BTreeSet<ItemId>) -> BTreeSet<ItemId> {
        self.items.intersection(wanted).copied().collect()
    }

    /// Number of items of `wanted` that can be bought here
    pub fn fulfil_count(&self, wanted: &BTreeSet<ItemId>) -> usize {
        self.items.intersection(wanted).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_shop() -> Shop {
        Shop::new(1, Location::new(0.0, 0.0), [1, 2, 3], 4.5)
    }

    #[test]
    fn test_has_item() {
        let shop = create_test_shop();
        assert!(shop.has_item(&1));
        assert!(shop.has_item(&3));
        assert!(!shop.has_item(&4));
    }

    #[test]
    fn test_fulfils() {
        let shop = create_test_shop();
        let wanted: BTreeSet<ItemId> = [2, 3, 7].into_iter().collect();

        assert_eq!(shop.fulfils(&wanted), [2, 3].into_iter().collect());
        assert_eq!(shop.fulfil_count(&wanted), 2);
    }

    #[test]
    fn test_duplicate_items_collapse() {
        let shop = Shop::new(2, Location::new(1.0, 1.0), [5, 5, 6], 0.0);
        assert_eq!(shop.items.len(), 2);
    }
}
