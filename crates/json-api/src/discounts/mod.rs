//! Cart discount endpoint

pub(crate) mod apply;
pub(crate) mod errors;
pub(crate) mod requests;
pub(crate) mod responses;
