//! App Router

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*, trailing_slash::remove_slash};

use crate::{discounts, healthcheck, observability, state::State};

/// Builds the full application router.
///
/// `/metrics` is only mounted when `metrics_enabled` is set.
pub(crate) fn app_router(state: Arc<State>, metrics_enabled: bool) -> Router {
    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("cart/discount").post(discounts::apply::handler));

    if metrics_enabled {
        router.push(Router::with_path("metrics").get(observability::metrics_handler))
    } else {
        router
    }
}

/// Wraps the router in a service whose request logging also sees requests
/// that match no route.
pub(crate) fn app_service(router: Router) -> Service {
    Service::new(router).hoop(observability::request_logging)
}
