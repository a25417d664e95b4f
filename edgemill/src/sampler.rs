//! Per-slice-minute stochastic metric sampling.
//!
//! Every metric derives from a small set of lookup tables keyed by service
//! or content type, each with a declared fallback for unknown keys so
//! caller-supplied catalog overrides degrade gracefully instead of erroring.
//!
//! Draw order is part of the determinism contract: requests, cache-hit,
//! p50, p95, p99, bytes, 500, 502, 503, 504, CRC. Inserting, removing, or
//! reordering a draw changes every dataset generated afterwards.

use crate::catalog::Slice;
use crate::rng::SeededRng;

/// Mutable metric state for one slice-minute.
///
/// Produced by [`sample_slice_metrics`], mutated in place by the incident
/// engine, then finalized into status buckets and a row.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceMetrics {
    /// Total requests served this minute. Always positive for emitted rows.
    pub requests: u64,
    /// Cache hit rate in `[0.01, 0.99]`.
    pub cache_hit_rate: f64,
    /// Median response latency, milliseconds.
    pub p50_ms: f64,
    /// 95th percentile response latency, milliseconds.
    pub p95_ms: f64,
    /// 99th percentile response latency, milliseconds.
    pub p99_ms: f64,
    /// Bytes sent to clients this minute.
    pub bytes_sent: u64,
    /// HTTP 500 responses.
    pub status_500: u64,
    /// HTTP 502 responses.
    pub status_502: u64,
    /// HTTP 503 responses.
    pub status_503: u64,
    /// HTTP 504 responses.
    pub status_504: u64,
    /// Payload CRC verification failures.
    pub crc_errors: u64,
}

impl SliceMetrics {
    /// Megabytes sent, the base quantity for CRC error rates.
    pub fn megabytes_sent(&self) -> f64 {
        self.bytes_sent as f64 / 1e6
    }

    /// Sum of the four explicit 5xx subtype counts.
    pub fn http_5xx(&self) -> u64 {
        self.status_500 + self.status_502 + self.status_503 + self.status_504
    }

    /// Re-clamp `p50 <= p95 <= p99` after sampling and incident mutation.
    ///
    /// Both the independent percentile draws and incident multipliers can
    /// invert the ordering; this restores it without touching p50.
    pub fn restore_percentile_order(&mut self) {
        self.p95_ms = self.p95_ms.max(self.p50_ms);
        self.p99_ms = self.p99_ms.max(self.p95_ms);
    }
}

/// Baseline requests-per-second by service.
fn base_rps(service: &str) -> f64 {
    match service {
        "live" => 90.0,
        "vod" => 60.0,
        "dvr" => 25.0,
        "eas" => 10.0,
        "live_ott" => 40.0,
        "app_backend" => 35.0,
        _ => 30.0,
    }
}

/// Volume multiplier by content type.
fn content_type_multiplier(content_type: &str) -> f64 {
    match content_type {
        "manifest" => 0.35,
        "segment" => 1.0,
        "api" => 0.55,
        _ => 0.6,
    }
}

/// Baseline cache hit rate by content type.
fn cache_hit_base(content_type: &str) -> f64 {
    match content_type {
        "manifest" => 0.82,
        "segment" => 0.90,
        "api" => 0.55,
        _ => 0.75,
    }
}

/// Baseline median latency in milliseconds by content type.
fn p50_base_ms(content_type: &str) -> f64 {
    match content_type {
        "manifest" => 120.0,
        "segment" => 80.0,
        "api" => 160.0,
        _ => 110.0,
    }
}

/// Latency addend in milliseconds by service.
fn service_latency_addend(service: &str) -> f64 {
    match service {
        "live" => 15.0,
        "vod" => 10.0,
        "dvr" => 20.0,
        "eas" => 25.0,
        "live_ott" => 18.0,
        "app_backend" => 30.0,
        _ => 15.0,
    }
}

/// Mean payload size in bytes by content type.
fn avg_bytes(content_type: &str) -> f64 {
    match content_type {
        "manifest" => 18_000.0,
        "segment" => 900_000.0,
        "api" => 45_000.0,
        _ => 120_000.0,
    }
}

/// Sample one minute of metrics for a slice.
///
/// Returns `None` when the Poisson volume draw lands on zero requests; the
/// slice-minute is silently skipped and nothing downstream of the volume
/// draw consumes randomness for it.
pub fn sample_slice_metrics(
    rng: &mut SeededRng,
    slice: &Slice,
    diurnal_mult: f64,
) -> Option<SliceMetrics> {
    let region_mult = if slice.region.starts_with("us") { 1.15 } else { 1.05 };
    let lambda = (base_rps(&slice.service)
        * 60.0
        * content_type_multiplier(&slice.content_type)
        * region_mult
        * diurnal_mult)
        .max(0.0);

    let requests = rng.poisson(lambda);
    if requests == 0 {
        return None;
    }

    let cache_hit_rate = rng
        .normal(cache_hit_base(&slice.content_type), 0.05)
        .clamp(0.05, 0.99);

    let p50_center = p50_base_ms(&slice.content_type) + service_latency_addend(&slice.service);
    let p50_ms = rng.log_normal(p50_center.ln(), 0.25).max(5.0);
    let p95_ms = p50_ms * rng.normal(2.2, 0.25);
    let p99_ms = p50_ms * rng.normal(3.4, 0.35);

    let avg = avg_bytes(&slice.content_type);
    let bytes_sent = (requests as f64 * rng.normal(avg, 0.15 * avg).max(2000.0)) as u64;

    let mut rate_500 = 0.0004;
    let rate_502 = 0.0003;
    let rate_503 = 0.0002;
    let mut rate_504 = 0.0002;
    if slice.service == "app_backend" {
        rate_500 *= 2.0;
        rate_504 *= 1.5;
    }
    let status_500 = rng.binomial(requests, rate_500);
    let status_502 = rng.binomial(requests, rate_502);
    let status_503 = rng.binomial(requests, rate_503);
    let status_504 = rng.binomial(requests, rate_504);

    let megabytes = bytes_sent as f64 / 1e6;
    let crc_errors = rng.poisson((megabytes * 0.002).max(0.0));

    Some(SliceMetrics {
        requests,
        cache_hit_rate,
        p50_ms,
        p95_ms,
        p99_ms,
        bytes_sent,
        status_500,
        status_502,
        status_503,
        status_504,
        crc_errors,
    })
}
