//! Receipt

use crate::items::ConsolidatedItem;

/// Result of pricing a cart against a set of discount codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Consolidated items in first-seen order
    items: Vec<ConsolidatedItem>,

    /// Total cost before any discounts
    subtotal: u64,

    /// Amount taken off the subtotal, never more than the subtotal
    discount: u64,

    /// Amount owed after discounts
    total: u64,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(items: Vec<ConsolidatedItem>, subtotal: u64, discount: u64, total: u64) -> Self {
        Self {
            items,
            subtotal,
            discount,
            total,
        }
    }

    /// A receipt for a cart with no items.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0, 0)
    }

    /// Consolidated items in the order they first appeared in the cart
    pub fn items(&self) -> &[ConsolidatedItem] {
        &self.items
    }

    /// Total cost before any discounts
    pub fn subtotal(&self) -> u64 {
        self.subtotal
    }

    /// Amount taken off the subtotal
    pub fn discount(&self) -> u64 {
        self.discount
    }

    /// Amount owed after discounts
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Consumes the receipt, returning its items.
    pub fn into_items(self) -> Vec<ConsolidatedItem> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_values_from_constructor() {
        let receipt = Receipt::new(
            vec![ConsolidatedItem::new("cake", 1000, 5)],
            5000,
            1000,
            4000,
        );

        assert_eq!(receipt.items(), [ConsolidatedItem::new("cake", 1000, 5)]);
        assert_eq!(receipt.subtotal(), 5000);
        assert_eq!(receipt.discount(), 1000);
        assert_eq!(receipt.total(), 4000);
    }

    #[test]
    fn empty_receipt_is_all_zeroes() {
        let receipt = Receipt::empty();

        assert!(receipt.items().is_empty());
        assert_eq!(
            (receipt.subtotal(), receipt.discount(), receipt.total()),
            (0, 0, 0)
        );
    }

    #[test]
    fn into_items_returns_owned_items() {
        let receipt = Receipt::new(vec![ConsolidatedItem::new("tea", 150, 2)], 300, 0, 300);

        assert_eq!(
            receipt.into_items(),
            vec![ConsolidatedItem::new("tea", 150, 2)]
        );
    }
}
