//! Prometheus metrics for HTTP traffic and cart outcomes.
//!
//! Every series lives in one registry prefixed with `cart_discount_json`.
//! Route labels are bounded: paths outside the mounted routes share a
//! single label.

use std::sync::OnceLock;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TEXT_FORMAT,
    TextEncoder, core::Collector,
};
use salvo::{
    handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
    prelude::Response,
};
use tracing::error;

const NAMESPACE: &str = "cart_discount_json";
const UNMATCHED_ROUTE: &str = "unmatched";
const ROUTES: [&str; 5] = [
    "/cart/discount",
    "/healthcheck",
    "/metrics",
    "/api-doc/openapi.json",
    "/docs",
];

static METRICS: OnceLock<Option<Metrics>> = OnceLock::new();

#[derive(Debug)]
struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    carts_total: IntCounterVec,
    discount_granted_total: IntCounter,
}

impl Metrics {
    fn build() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some(NAMESPACE.to_owned()), None)?;

        let requests_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "http_requests_total",
                    "HTTP requests by method, route and status class.",
                ),
                &["method", "route", "status_class"],
            )?,
        )?;

        let request_duration_seconds = register(
            &registry,
            HistogramVec::new(
                HistogramOpts::new(
                    "http_request_duration_seconds",
                    "HTTP request duration in seconds by method and route.",
                )
                .buckets(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05, 0.25, 1.0]),
                &["method", "route"],
            )?,
        )?;

        let requests_in_flight = register(
            &registry,
            IntGauge::new("http_requests_in_flight", "HTTP requests being served.")?,
        )?;

        let carts_total = register(
            &registry,
            IntCounterVec::new(
                Opts::new(
                    "carts_total",
                    "Discount requests by outcome (priced or the rejection reason).",
                ),
                &["outcome"],
            )?,
        )?;

        let discount_granted_total = register(
            &registry,
            IntCounter::new(
                "discount_granted_minor_units_total",
                "Sum of discounts granted to priced carts, in minor units.",
            )?,
        )?;

        Ok(Self {
            registry,
            requests_total,
            request_duration_seconds,
            requests_in_flight,
            carts_total,
            discount_granted_total,
        })
    }

    fn encode(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

fn register<C>(registry: &Registry, collector: C) -> Result<C, prometheus::Error>
where
    C: Collector + Clone + 'static,
{
    registry.register(Box::new(collector.clone()))?;

    Ok(collector)
}

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| {
            Metrics::build()
                .inspect_err(|source| error!("failed to build metrics registry: {source}"))
                .ok()
        })
        .as_ref()
}

/// Keeps the in-flight gauge raised for as long as it lives.
#[derive(Debug)]
pub(super) struct InFlightRequestGuard(Option<&'static IntGauge>);

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let gauge = metrics().map(|metrics| &metrics.requests_in_flight);

        if let Some(gauge) = gauge {
            gauge.inc();
        }

        Self(gauge)
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if let Some(gauge) = self.0 {
            gauge.dec();
        }
    }
}

/// Label for the route a request was served by.
///
/// Only mounted routes become labels, so arbitrary URLs cannot create
/// series. A trailing slash or a deeper path (Swagger UI assets) maps onto
/// the mounted route.
pub(super) fn route_label(path: &str) -> &'static str {
    let path = path.trim_end_matches('/');

    ROUTES
        .into_iter()
        .find(|route| {
            path.strip_prefix(route)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
        .unwrap_or(UNMATCHED_ROUTE)
}

pub(super) fn observe_request(method: &str, route: &str, status: StatusCode, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class(status)])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count a cart that was priced, adding its discount to the running total.
pub(crate) fn record_cart_priced(discount: u64) {
    if let Some(metrics) = metrics() {
        metrics.carts_total.with_label_values(&["priced"]).inc();
        metrics.discount_granted_total.inc_by(discount);
    }
}

/// Count a discount request that did not produce a receipt.
pub(crate) fn record_cart_rejected(reason: &str) {
    if let Some(metrics) = metrics() {
        metrics.carts_total.with_label_values(&[reason]).inc();
    }
}

#[handler]
pub(crate) async fn metrics_handler(res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    match metrics.encode() {
        Ok(body) => {
            res.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_FORMAT));
            res.render(body);
        }
        Err(source) => {
            error!("failed to encode metrics response: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
