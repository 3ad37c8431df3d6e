//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use crate::state::State;

pub(crate) const TEST_MAX_BODY_BYTES: usize = 4096;

pub(crate) fn test_state() -> Arc<State> {
    Arc::new(State::new(TEST_MAX_BODY_BYTES))
}

pub(crate) fn discount_service(route: Router) -> Service {
    Service::new(Router::new().hoop(inject(test_state())).push(route))
}
