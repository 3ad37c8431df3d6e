//! State

use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared per-server state injected into every request.
#[derive(Debug, Clone)]
pub(crate) struct State {
    /// Largest request body the discount handler will read.
    pub(crate) max_body_bytes: usize,
}

impl State {
    #[must_use]
    pub(crate) fn new(max_body_bytes: usize) -> Self {
        Self { max_body_bytes }
    }

    #[must_use]
    pub(crate) fn from_config(config: &ServerConfig) -> Arc<Self> {
        Arc::new(Self::new(config.server.max_body_bytes))
    }
}
