//! Discount Codes
//!
//! Parses the textual codes a shopper enters at checkout into typed
//! discount instructions. Matching is ASCII case-insensitive and no
//! surrounding or inner whitespace is accepted.

use std::{fmt, str::FromStr};

use thiserror::Error;

const BOGO: &str = "BOGO";
const FLAT_PREFIX: &str = "FLAT_";
const PERCENT_PREFIX: &str = "PERCENT_";

/// Errors produced when a discount code cannot be parsed.
///
/// Each variant carries the code exactly as the caller supplied it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DiscountCodeError {
    /// `FLAT_X` with a suffix that is not a non-negative integer.
    #[error("Invalid discount code: '{0}'. FLAT_X requires X to be a non-negative integer.")]
    InvalidFlatAmount(String),

    /// `PERCENT_X` with a suffix that is not an integer.
    #[error("Invalid discount code: '{0}'. PERCENT_X requires X to be an integer.")]
    InvalidPercentage(String),

    /// `PERCENT_X` with an integer suffix outside `0..=100`.
    #[error("Invalid discount code: '{0}'. PERCENT_X requires X to be between 0 and 100.")]
    PercentageOutOfRange(String),

    /// Code does not match any known discount.
    #[error("Unrecognized discount code: '{0}'.")]
    Unrecognized(String),
}

/// A whole-number percentage in the range `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u8);

impl Percentage {
    /// Largest accepted percentage.
    pub const MAX: u8 = 100;

    /// Creates a percentage, returning `None` when `value` exceeds 100.
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX).then_some(Self(value))
    }

    /// Returns the percentage as a whole number.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Percentage {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Percentage::new)
            .ok_or(value)
    }
}

/// A parsed discount instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountCode {
    /// Subtract a fixed amount in minor units (e.g. `FLAT_500`).
    Flat(u64),

    /// Subtract a percentage of the subtotal (e.g. `PERCENT_15`).
    Percent(Percentage),

    /// Every second unit of the cheapest item(s) is free (`BOGO`).
    Bogo,
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountCode::Flat(amount) => write!(f, "{FLAT_PREFIX}{amount}"),
            DiscountCode::Percent(percent) => write!(f, "{PERCENT_PREFIX}{}", percent.value()),
            DiscountCode::Bogo => f.write_str(BOGO),
        }
    }
}

impl FromStr for DiscountCode {
    type Err = DiscountCodeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        parse(code)
    }
}

/// Parses a discount code string.
///
/// # Errors
///
/// Returns a [`DiscountCodeError`] describing why `code` is not a valid
/// `BOGO`, `FLAT_X` or `PERCENT_X` code.
pub fn parse(code: &str) -> Result<DiscountCode, DiscountCodeError> {
    let normalised = code.to_ascii_uppercase();

    if normalised == BOGO {
        return Ok(DiscountCode::Bogo);
    }

    if let Some(amount) = normalised.strip_prefix(FLAT_PREFIX) {
        return amount
            .parse::<u64>()
            .map(DiscountCode::Flat)
            .map_err(|_invalid| DiscountCodeError::InvalidFlatAmount(code.to_owned()));
    }

    if let Some(rate) = normalised.strip_prefix(PERCENT_PREFIX) {
        return parse_percentage(rate)
            .map(DiscountCode::Percent)
            .map_err(|rate| match rate {
                RateError::NotInteger => DiscountCodeError::InvalidPercentage(code.to_owned()),
                RateError::OutOfRange => DiscountCodeError::PercentageOutOfRange(code.to_owned()),
            });
    }

    Err(DiscountCodeError::Unrecognized(code.to_owned()))
}

enum RateError {
    NotInteger,
    OutOfRange,
}

/// Any optionally signed run of ASCII digits is an integer, however long;
/// only integers inside `0..=100` are percentages.
fn parse_percentage(rate: &str) -> Result<Percentage, RateError> {
    let negative = rate.starts_with('-');
    let digits = rate
        .strip_prefix(|sign: char| sign == '+' || sign == '-')
        .unwrap_or(rate);

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(RateError::NotInteger);
    }

    digits
        .parse::<u8>()
        .ok()
        .filter(|value| !negative || *value == 0)
        .and_then(Percentage::new)
        .ok_or(RateError::OutOfRange)
}
