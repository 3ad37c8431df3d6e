//! Cart Discount Errors

use salvo::{
    http::{ParseError, StatusCode},
    prelude::{Json, Response, StatusError},
    writing::Scribe,
};
use thiserror::Error;
use tracing::{error, warn};

use cart_discount::calculator::CartError;

use super::responses::ErrorResponse;

/// Everything that can stop a discount request from producing a receipt.
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("Request body is not valid JSON.")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Request body exceeds the {limit} byte limit.")]
    PayloadTooLarge {
        limit: usize,
        #[source]
        source: Option<ParseError>,
    },

    #[error("Internal server error.")]
    Internal(#[from] StatusError),
}

impl ApiError {
    pub(crate) fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Cart(_) | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(status) => status.code,
        }
    }

    /// Metrics label naming why no receipt was produced.
    pub(crate) fn outcome(&self) -> &'static str {
        match self {
            ApiError::Cart(CartError::Validation(_)) => "invalid_cart",
            ApiError::Cart(CartError::Pricing(_)) => "overflow",
            ApiError::InvalidJson(_) => "invalid_json",
            ApiError::PayloadTooLarge { .. } => "payload_too_large",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        match &self {
            ApiError::Cart(source) => warn!("rejected cart: {source}"),
            ApiError::InvalidJson(source) => warn!("malformed cart body: {source}"),
            ApiError::PayloadTooLarge { limit, .. } => warn!(limit, "cart body too large"),
            ApiError::Internal(source) => error!("discount handler failed: {source}"),
        }

        res.status_code(self.status_code());
        res.render(Json(ErrorResponse {
            error: self.to_string(),
        }));
    }
}
