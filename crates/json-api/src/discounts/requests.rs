//! Cart Discount Requests

use serde::{Deserialize, Serialize};

use cart_discount::validation::{UnvalidatedCart, UnvalidatedLineItem};

/// A cart line as sent by the client; every field may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct LineItemRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub price: Option<i64>,

    #[serde(default)]
    pub quantity: Option<i64>,
}

impl From<LineItemRequest> for UnvalidatedLineItem {
    fn from(item: LineItemRequest) -> Self {
        UnvalidatedLineItem {
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Body of `POST /cart/discount`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartRequest {
    #[serde(default)]
    pub items: Option<Vec<LineItemRequest>>,

    #[serde(default)]
    pub discount_codes: Option<Vec<Option<String>>>,
}

impl From<CartRequest> for UnvalidatedCart {
    fn from(request: CartRequest) -> Self {
        UnvalidatedCart {
            items: request
                .items
                .map(|items| items.into_iter().map(Into::into).collect()),
            discount_codes: request.discount_codes,
        }
    }
}
