//! Apply Discount Handler

use std::sync::Arc;

use salvo::{http::header::CONTENT_LENGTH, prelude::*};
use tracing::debug;

use cart_discount::calculator::calculate;

use crate::{extensions::*, observability, state::State};

use super::{errors::ApiError, requests::CartRequest, responses::CartResponse};

/// Apply discount codes to a cart
///
/// Consolidates duplicate lines and returns the subtotal, discount and total
/// in integer minor units. Rejected carts return `{ "error": "..." }`.
#[endpoint(tags("discounts"), summary = "Apply discount codes to a cart")]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match apply(req, depot).await {
        Ok(response) => {
            observability::record_cart_priced(response.discount);
            res.render(Json(response));
        }
        Err(error) => {
            observability::record_cart_rejected(error.outcome());
            res.render(error);
        }
    }
}

async fn apply(req: &mut Request, depot: &Depot) -> Result<CartResponse, ApiError> {
    let limit = depot.obtain_or_500::<Arc<State>>()?.max_body_bytes;

    let declared_length = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    if declared_length.is_some_and(|length| length > limit) {
        return Err(ApiError::PayloadTooLarge {
            limit,
            source: None,
        });
    }

    let body = req
        .payload_with_max_size(limit)
        .await
        .map_err(|source| ApiError::PayloadTooLarge {
            limit,
            source: Some(source),
        })?;

    let request = parse_body(body)?;

    debug!(
        codes = ?request.as_ref().and_then(|request| request.discount_codes.as_ref()),
        "applying discount codes"
    );

    let receipt = calculate(request.map(Into::into))?;

    debug!(
        items = receipt.items().len(),
        subtotal = receipt.subtotal(),
        discount = receipt.discount(),
        total = receipt.total(),
        "cart discounted"
    );

    Ok(receipt.into())
}

/// An empty or whitespace-only body is treated the same as JSON `null`.
fn parse_body(body: &[u8]) -> Result<Option<CartRequest>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body).map_err(ApiError::InvalidJson)
}
