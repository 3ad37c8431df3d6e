//! Cart Discount Responses

use serde::{Deserialize, Serialize};

use cart_discount::{items::ConsolidatedItem, receipt::Receipt};

/// A consolidated cart line in the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CartItemResponse {
    pub name: String,
    pub price: u64,
    pub quantity: u64,
}

impl From<ConsolidatedItem> for CartItemResponse {
    fn from(item: ConsolidatedItem) -> Self {
        CartItemResponse {
            name: item.name().to_owned(),
            price: item.price(),
            quantity: item.quantity(),
        }
    }
}

/// Successful discount calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    pub items: Vec<CartItemResponse>,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
}

impl From<Receipt> for CartResponse {
    fn from(receipt: Receipt) -> Self {
        let (subtotal, discount, total) = (receipt.subtotal(), receipt.discount(), receipt.total());

        CartResponse {
            items: receipt.into_items().into_iter().map(Into::into).collect(),
            subtotal,
            discount,
            total,
        }
    }
}

/// Body returned for every rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
}
