//! Cart Discount
//!
//! Cart Discount prices a shopping cart against a set of discount codes
//! (`FLAT_X`, `PERCENT_X` and `BOGO`), returning the consolidated items
//! together with the subtotal, discount and total in minor currency units.

pub mod calculator;
pub mod codes;
pub mod fixtures;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod validation;
