//! Calculator
//!
//! Runs a caller-supplied cart through validation, consolidation and pricing.

use thiserror::Error;

use crate::{
    items::consolidate,
    pricing::{PricingError, compute},
    receipt::Receipt,
    validation::{UnvalidatedCart, ValidationError, validate},
};

/// Errors that can occur while calculating a cart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// The request was rejected before pricing.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Validates the cart, merges duplicate lines and applies its discount codes.
///
/// # Errors
///
/// Returns [`CartError::Validation`] for the first problem found in the
/// request and [`CartError::Pricing`] if merged quantities or totals cannot
/// be represented.
pub fn calculate(cart: Option<UnvalidatedCart>) -> Result<Receipt, CartError> {
    let cart = validate(cart)?;
    let items = consolidate(cart.items()).ok_or(PricingError::Overflow)?;

    Ok(compute(&items, cart.codes())?)
}
