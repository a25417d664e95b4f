//! HTTP status-class bucket allocation.
//!
//! The 5xx bucket is the sum of the four explicitly sampled subtypes; 4xx
//! and 3xx are carved out of the remaining traffic with small per-slice
//! rates, and whatever is left is 2xx. The Binomial draws always happen,
//! even over zero remaining requests, so the random consumption schedule
//! does not depend on how hard incidents inflated the 5xx counts.

use crate::catalog::Slice;
use crate::rng::SeededRng;
use crate::sampler::SliceMetrics;

/// Final per-row status-class counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBuckets {
    /// Successful responses.
    pub http_2xx: u64,
    /// Redirects.
    pub http_3xx: u64,
    /// Client errors.
    pub http_4xx: u64,
    /// Server errors; equals the sum of the four explicit subtypes.
    pub http_5xx: u64,
}

/// Derive the 2xx/3xx/4xx split from total requests and the sampled 5xx
/// subtypes.
///
/// The buckets sum exactly to `requests` whenever `http_5xx <= requests`.
/// When incident amplification pushes the 5xx subtypes past total requests,
/// the reconciliation step clamps `http_2xx` to zero and stops there: the
/// 5xx overcount is deliberately left standing rather than rescaled, and
/// the sum invariant is knowingly violated for that row.
pub fn allocate_status_buckets(
    rng: &mut SeededRng,
    metrics: &SliceMetrics,
    slice: &Slice,
) -> StatusBuckets {
    let requests = metrics.requests;
    let http_5xx = metrics.http_5xx();
    let mut remaining = requests.saturating_sub(http_5xx);

    // 4xx baseline, higher for app_backend and api traffic.
    let mut rate_4xx: f64 = 0.004;
    if slice.service == "app_backend" {
        rate_4xx *= 2.0;
    }
    if slice.content_type == "api" {
        rate_4xx *= 1.5;
    }
    let http_4xx = rng.binomial(remaining, rate_4xx.min(0.25));
    remaining -= http_4xx;

    // 3xx baseline, redirects more likely on manifests and api.
    let mut rate_3xx: f64 = 0.02;
    if slice.content_type == "manifest" {
        rate_3xx *= 1.3;
    }
    if slice.content_type == "api" {
        rate_3xx *= 1.1;
    }
    let http_3xx = rng.binomial(remaining, rate_3xx.min(0.40));
    remaining -= http_3xx;

    let mut http_2xx = remaining;

    // Reconciliation guard: a single clamp on 2xx, nothing more.
    if http_2xx + http_3xx + http_4xx + http_5xx != requests {
        http_2xx = requests.saturating_sub(http_3xx + http_4xx + http_5xx);
    }

    StatusBuckets {
        http_2xx,
        http_3xx,
        http_4xx,
        http_5xx,
    }
}
