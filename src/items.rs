//! Items

use rustc_hash::FxHashMap;

/// A validated cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    name: String,
    price: u64,
    quantity: u64,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(name: impl Into<String>, price: u64, quantity: u64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price in minor units.
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Returns the number of units on this line.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }
}

/// All cart lines sharing a name, merged into one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedItem {
    name: String,
    price: u64,
    quantity: u64,
}

impl ConsolidatedItem {
    /// Creates a new consolidated item.
    pub fn new(name: impl Into<String>, price: u64, quantity: u64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Returns the item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price in minor units.
    pub fn price(&self) -> u64 {
        self.price
    }

    /// Returns the total number of units across all merged lines.
    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Returns `price × quantity`, or `None` on overflow.
    pub fn line_total(&self) -> Option<u64> {
        self.price.checked_mul(self.quantity)
    }
}

/// Merges lines with the same name, preserving first-seen order.
///
/// The price of the first line for a name is kept; callers are expected to
/// have rejected carts where duplicate names disagree on price. Returns
/// `None` if a merged quantity does not fit in a `u64`.
pub fn consolidate(items: &[LineItem]) -> Option<Vec<ConsolidatedItem>> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut consolidated: Vec<ConsolidatedItem> = Vec::with_capacity(items.len());

    for item in items {
        match positions.get(item.name()).copied() {
            Some(position) => {
                let existing = consolidated.get_mut(position)?;
                existing.quantity = existing.quantity.checked_add(item.quantity())?;
            }
            None => {
                positions.insert(item.name(), consolidated.len());
                consolidated.push(ConsolidatedItem::new(
                    item.name(),
                    item.price(),
                    item.quantity(),
                ));
            }
        }
    }

    Some(consolidated)
}

/// Returns the lowest unit price among the items.
pub fn cheapest_price(items: &[ConsolidatedItem]) -> Option<u64> {
    items.iter().map(ConsolidatedItem::price).min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consolidate_empty_is_empty() {
        assert_eq!(consolidate(&[]), Some(Vec::new()));
    }

    #[test]
    fn consolidate_sums_quantities_for_duplicate_names() {
        let items = [
            LineItem::new("cake", 1000, 2),
            LineItem::new("cake", 1000, 3),
        ];

        assert_eq!(
            consolidate(&items),
            Some(vec![ConsolidatedItem::new("cake", 1000, 5)])
        );
    }

    #[test]
    fn consolidate_preserves_first_seen_order() {
        let items = [
            LineItem::new("cookie", 200, 1),
            LineItem::new("cake", 1000, 1),
            LineItem::new("cookie", 200, 2),
            LineItem::new("muffin", 300, 1),
        ];

        let names: Vec<_> = consolidate(&items)
            .unwrap_or_default()
            .iter()
            .map(|item| item.name().to_owned())
            .collect();

        assert_eq!(names, ["cookie", "cake", "muffin"]);
    }

    #[test]
    fn consolidate_keeps_first_price() {
        let items = [LineItem::new("tea", 150, 1), LineItem::new("tea", 999, 1)];

        assert_eq!(
            consolidate(&items),
            Some(vec![ConsolidatedItem::new("tea", 150, 2)])
        );
    }

    #[test]
    fn consolidate_is_case_sensitive_on_names() {
        let items = [LineItem::new("Cake", 100, 1), LineItem::new("cake", 100, 1)];

        assert_eq!(consolidate(&items).as_deref().map(<[ConsolidatedItem]>::len), Some(2));
    }

    #[test]
    fn consolidate_reports_quantity_overflow() {
        let items = [
            LineItem::new("a", 1, u64::MAX),
            LineItem::new("b", 1, 1),
            LineItem::new("a", 1, 1),
        ];

        assert_eq!(consolidate(&items), None);
    }

    #[test]
    fn cheapest_price_includes_zero() {
        let items = [
            ConsolidatedItem::new("freebie", 0, 3),
            ConsolidatedItem::new("cake", 1000, 2),
        ];

        assert_eq!(cheapest_price(&items), Some(0));
        assert_eq!(cheapest_price(&[]), None);
    }

    #[test]
    fn line_total_detects_overflow() {
        assert_eq!(ConsolidatedItem::new("a", 250, 4).line_total(), Some(1000));
        assert_eq!(ConsolidatedItem::new("b", u64::MAX, 2).line_total(), None);
    }
}
