//! Cart Discount prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::{CartError, calculate},
    codes::{DiscountCode, DiscountCodeError, Percentage},
    items::{ConsolidatedItem, LineItem, consolidate},
    pricing::{PricingError, compute},
    receipt::Receipt,
    validation::{
        UnvalidatedCart, UnvalidatedLineItem, ValidatedCart, ValidationError, validate,
    },
};
