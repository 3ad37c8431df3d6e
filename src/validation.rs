//! Validation
//!
//! Turns caller-supplied cart data, where any field may be missing, into a
//! [`ValidatedCart`] whose codes are already parsed and whose items are fully
//! typed. Checks run in a fixed order and stop at the first failure.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    codes::{DiscountCode, DiscountCodeError, parse},
    items::LineItem,
};

/// Errors raised while validating a cart request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// No request body was supplied.
    #[error("Request body is required.")]
    MissingBody,

    /// The discount code list was absent or empty.
    #[error("At least one discount code is required.")]
    MissingDiscountCodes,

    /// A discount code was null, empty or whitespace.
    #[error("Discount codes must not be null or empty.")]
    BlankDiscountCode,

    /// A discount code could not be parsed.
    #[error(transparent)]
    Code(#[from] DiscountCodeError),

    /// A line item had no usable name.
    #[error("Line item name is required.")]
    MissingItemName,

    /// A line item had no price.
    #[error("Price is required for item '{0}'.")]
    MissingPrice(String),

    /// A line item had a negative price.
    #[error("Price must not be negative for item '{0}'.")]
    NegativePrice(String),

    /// A line item had no quantity.
    #[error("Quantity is required for item '{0}'.")]
    MissingQuantity(String),

    /// A line item had a zero or negative quantity.
    #[error("Quantity must be greater than 0 for item '{0}'.")]
    NonPositiveQuantity(String),

    /// Two line items share a name but disagree on price.
    #[error("Duplicate item '{0}' has conflicting prices.")]
    ConflictingPrices(String),
}

/// A cart line as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnvalidatedLineItem {
    /// Item name
    pub name: Option<String>,

    /// Unit price in minor units
    pub price: Option<i64>,

    /// Number of units
    pub quantity: Option<i64>,
}

impl UnvalidatedLineItem {
    /// Creates a line item with every field present.
    pub fn new(name: impl Into<String>, price: i64, quantity: i64) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            quantity: Some(quantity),
        }
    }
}

/// A cart as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnvalidatedCart {
    /// Cart lines; absent is treated like empty
    pub items: Option<Vec<UnvalidatedLineItem>>,

    /// Discount codes to apply; individual entries may be null
    pub discount_codes: Option<Vec<Option<String>>>,
}

/// A cart that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCart {
    items: Vec<LineItem>,
    codes: Vec<DiscountCode>,
}

impl ValidatedCart {
    /// Validated line items, in request order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Parsed discount codes, in request order. Never empty.
    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }
}

/// Validates a cart request.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found, checking in order: body
/// presence, code list presence, each code, each item, then duplicate items
/// with conflicting prices.
pub fn validate(cart: Option<UnvalidatedCart>) -> Result<ValidatedCart, ValidationError> {
    let cart = cart.ok_or(ValidationError::MissingBody)?;

    let codes = validate_codes(&cart.discount_codes.unwrap_or_default())?;
    let items = validate_items(cart.items.unwrap_or_default())?;

    Ok(ValidatedCart { items, codes })
}

fn validate_codes(codes: &[Option<String>]) -> Result<Vec<DiscountCode>, ValidationError> {
    if codes.is_empty() {
        return Err(ValidationError::MissingDiscountCodes);
    }

    codes
        .iter()
        .map(|code| match code.as_deref() {
            Some(code) if !code.trim().is_empty() => parse(code).map_err(ValidationError::from),
            _ => Err(ValidationError::BlankDiscountCode),
        })
        .collect()
}

fn validate_items(items: Vec<UnvalidatedLineItem>) -> Result<Vec<LineItem>, ValidationError> {
    let items = items
        .into_iter()
        .map(validate_item)
        .collect::<Result<Vec<_>, _>>()?;

    ensure_consistent_prices(&items)?;

    Ok(items)
}

fn validate_item(item: UnvalidatedLineItem) -> Result<LineItem, ValidationError> {
    let name = match item.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ValidationError::MissingItemName),
    };

    let Some(price) = item.price else {
        return Err(ValidationError::MissingPrice(name));
    };

    let Ok(price) = u64::try_from(price) else {
        return Err(ValidationError::NegativePrice(name));
    };

    let Some(quantity) = item.quantity else {
        return Err(ValidationError::MissingQuantity(name));
    };

    let quantity = match u64::try_from(quantity) {
        Ok(quantity) if quantity > 0 => quantity,
        _ => return Err(ValidationError::NonPositiveQuantity(name)),
    };

    Ok(LineItem::new(name, price, quantity))
}

/// The first line with a given name fixes the expected price for later lines.
fn ensure_consistent_prices(items: &[LineItem]) -> Result<(), ValidationError> {
    let mut prices: FxHashMap<&str, u64> = FxHashMap::default();

    for item in items {
        let expected = *prices.entry(item.name()).or_insert(item.price());

        if expected != item.price() {
            return Err(ValidationError::ConflictingPrices(item.name().to_owned()));
        }
    }

    Ok(())
}
