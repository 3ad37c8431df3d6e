//! Scenario Fixtures

use serde::Deserialize;

use crate::{
    calculator::{CartError, calculate},
    receipt::Receipt,
    validation::{UnvalidatedCart, UnvalidatedLineItem},
};

/// Wrapper for a scenario set in YAML
#[derive(Debug, Deserialize)]
pub struct ScenariosFixture {
    /// Scenarios in file order
    pub scenarios: Vec<Scenario>,
}

/// A cart line in YAML; fields may be omitted to describe invalid requests
#[derive(Debug, Clone, Deserialize)]
pub struct ItemFixture {
    /// Item name
    #[serde(default)]
    pub name: Option<String>,

    /// Unit price in minor units
    #[serde(default)]
    pub price: Option<i64>,

    /// Number of units
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl From<ItemFixture> for UnvalidatedLineItem {
    fn from(item: ItemFixture) -> Self {
        UnvalidatedLineItem {
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Expected outcome of a scenario
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Expectation {
    /// The cart prices successfully with these totals
    Totals {
        /// Expected subtotal
        subtotal: u64,

        /// Expected discount
        discount: u64,

        /// Expected total
        total: u64,
    },

    /// The cart is rejected with this message
    Error {
        /// Expected error message
        error: String,
    },
}

/// A single cart and its expected outcome
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Scenario name, unique within a set
    pub name: String,

    /// Cart lines; omitted means no items
    #[serde(default)]
    pub items: Option<Vec<ItemFixture>>,

    /// Discount codes; `~` entries become null codes
    #[serde(default)]
    pub codes: Option<Vec<Option<String>>>,

    /// Expected outcome
    pub expect: Expectation,
}

impl Scenario {
    /// Build the caller-side cart for this scenario.
    pub fn cart(&self) -> UnvalidatedCart {
        UnvalidatedCart {
            items: self
                .items
                .clone()
                .map(|items| items.into_iter().map(Into::into).collect()),
            discount_codes: self.codes.clone(),
        }
    }

    /// Run the scenario through the calculator.
    ///
    /// # Errors
    ///
    /// Returns the [`CartError`] produced by the calculator.
    pub fn run(&self) -> Result<Receipt, CartError> {
        calculate(Some(self.cart()))
    }

    /// Run the scenario and describe how the outcome differs from the
    /// expectation, if at all.
    pub fn mismatch(&self) -> Option<String> {
        match (&self.expect, self.run()) {
            (
                Expectation::Totals {
                    subtotal,
                    discount,
                    total,
                },
                Ok(receipt),
            ) => {
                let actual = (receipt.subtotal(), receipt.discount(), receipt.total());

                (actual != (*subtotal, *discount, *total)).then(|| {
                    format!(
                        "{}: expected subtotal/discount/total {subtotal}/{discount}/{total}, got {}/{}/{}",
                        self.name, actual.0, actual.1, actual.2
                    )
                })
            }
            (Expectation::Error { error }, Err(actual)) => {
                let actual = actual.to_string();

                (actual != *error)
                    .then(|| format!("{}: expected error {error:?}, got {actual:?}", self.name))
            }
            (Expectation::Totals { .. }, Err(actual)) => Some(format!(
                "{}: expected totals, got error {:?}",
                self.name,
                actual.to_string()
            )),
            (Expectation::Error { error }, Ok(receipt)) => Some(format!(
                "{}: expected error {error:?}, got total {}",
                self.name,
                receipt.total()
            )),
        }
    }
}
