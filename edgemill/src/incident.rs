//! Incident injection.
//!
//! An [`Incident`] is a synthetic fault scoped to a half-open time window
//! and an optional subset of the traffic dimensions. The engine is an
//! ordered fold: incidents apply in caller list order, each mutating the
//! metric state left by the one before it, so list order is part of the
//! observable contract. Incident application never consumes randomness —
//! the RNG consumption schedule is identical with and without incidents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Slice;
use crate::sampler::SliceMetrics;

/// The failure mode an incident injects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentKind {
    /// Origin or path slowdown: all percentiles inflate.
    Latency,
    /// Cache tier losing hit rate, with tail latency fallout.
    CacheCollapse,
    /// Origin saturation: 503s plus tail latency.
    OriginOverload,
    /// Upstream timeouts: 504s plus a heavy p99 hit.
    Timeouts,
    /// Payload corruption burst: CRC errors scale with volume.
    CrcSpike,
}

/// A time-bounded, dimension-filtered metric modifier.
///
/// Filters are wildcards when unset: a `None` filter matches every value of
/// that dimension. The window is half-open — a minute timestamp equal to
/// `end` is outside the incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Caller-facing label for the scenario. Never consulted by matching.
    pub name: String,
    /// Inclusive window start.
    pub start: DateTime<Utc>,
    /// Exclusive window end.
    pub end: DateTime<Utc>,
    /// Failure mode to inject.
    pub kind: IncidentKind,
    /// Match only this partner, or any when `None`.
    pub partner: Option<String>,
    /// Match only this service, or any when `None`.
    pub service: Option<String>,
    /// Match only this region, or any when `None`.
    pub region: Option<String>,
    /// Match only this point of presence, or any when `None`.
    pub pop: Option<String>,
    /// Match only this content type, or any when `None`.
    pub content_type: Option<String>,
    /// Severity scaling factor; floored at 0.1 when applied.
    pub intensity: f64,
}

fn filter_matches(filter: &Option<String>, value: &str) -> bool {
    match filter {
        Some(expected) => expected == value,
        None => true,
    }
}

impl Incident {
    /// Create an incident covering `[start, end)` with no dimension filters
    /// and intensity 1.0.
    pub fn new(
        name: impl Into<String>,
        kind: IncidentKind,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            kind,
            partner: None,
            service: None,
            region: None,
            pop: None,
            content_type: None,
            intensity: 1.0,
        }
    }

    /// Restrict to one partner.
    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    /// Restrict to one service.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    /// Restrict to one region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Restrict to one point of presence.
    pub fn with_pop(mut self, pop: impl Into<String>) -> Self {
        self.pop = Some(pop.into());
        self
    }

    /// Restrict to one content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the severity scaling factor.
    pub fn with_intensity(mut self, intensity: f64) -> Self {
        self.intensity = intensity;
        self
    }

    /// Whether this incident covers the given minute and slice.
    pub fn matches(&self, ts: DateTime<Utc>, slice: &Slice) -> bool {
        if !(self.start <= ts && ts < self.end) {
            return false;
        }
        filter_matches(&self.partner, &slice.partner)
            && filter_matches(&self.service, &slice.service)
            && filter_matches(&self.region, &slice.region)
            && filter_matches(&self.pop, &slice.pop)
            && filter_matches(&self.content_type, &slice.content_type)
    }

    /// Mutate a slice-minute's metrics according to this incident's kind.
    ///
    /// Added error counts truncate toward zero, matching the integer
    /// semantics of the emitted counters.
    pub fn apply(&self, metrics: &mut SliceMetrics) {
        let intensity = self.intensity.max(0.1);
        match self.kind {
            IncidentKind::Latency => {
                metrics.p50_ms *= 1.3 * intensity;
                metrics.p95_ms *= 1.8 * intensity;
                metrics.p99_ms *= 2.2 * intensity;
            }
            IncidentKind::CacheCollapse => {
                metrics.cache_hit_rate =
                    (metrics.cache_hit_rate - 0.35 * intensity).clamp(0.01, 0.99);
                metrics.p95_ms *= 1.4 * intensity;
                metrics.p99_ms *= 1.7 * intensity;
            }
            IncidentKind::OriginOverload => {
                let share = (0.02 * intensity).clamp(0.0, 0.4);
                metrics.status_503 += (metrics.requests as f64 * share) as u64;
                metrics.p95_ms *= 1.5 * intensity;
                metrics.p99_ms *= 1.9 * intensity;
            }
            IncidentKind::Timeouts => {
                let share = (0.015 * intensity).clamp(0.0, 0.35);
                metrics.status_504 += (metrics.requests as f64 * share) as u64;
                metrics.p99_ms *= 2.4 * intensity;
            }
            IncidentKind::CrcSpike => {
                metrics.crc_errors +=
                    (metrics.megabytes_sent() * 0.25 * intensity).max(0.0) as u64;
            }
        }
    }
}

/// Apply every matching incident to one slice-minute, in list order, then
/// restore percentile ordering.
///
/// The final re-clamp runs unconditionally: independent percentile draws
/// can invert ordering even without incidents.
pub fn apply_incidents(
    incidents: &[Incident],
    ts: DateTime<Utc>,
    slice: &Slice,
    metrics: &mut SliceMetrics,
) {
    for incident in incidents {
        if incident.matches(ts, slice) {
            incident.apply(metrics);
        }
    }
    metrics.restore_percentile_order();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        (
            Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 20, 1, 0, 0).unwrap(),
        )
    }

    fn test_slice() -> Slice {
        Slice {
            partner: "partner_01".to_owned(),
            service: "live".to_owned(),
            region: "us-east".to_owned(),
            pop: "pop_001".to_owned(),
            host: "host_0001".to_owned(),
            content_type: "segment".to_owned(),
            ua_family: "stb".to_owned(),
        }
    }

    fn test_metrics() -> SliceMetrics {
        SliceMetrics {
            requests: 10_000,
            cache_hit_rate: 0.90,
            p50_ms: 100.0,
            p95_ms: 220.0,
            p99_ms: 340.0,
            bytes_sent: 9_000_000_000,
            status_500: 4,
            status_502: 3,
            status_503: 2,
            status_504: 2,
            crc_errors: 18,
        }
    }

    #[test]
    fn window_is_half_open() {
        let (start, end) = window();
        let incident = Incident::new("maintenance", IncidentKind::Latency, start, end);
        let slice = test_slice();
        assert!(incident.matches(start, &slice));
        assert!(incident.matches(end - chrono::TimeDelta::minutes(1), &slice));
        assert!(!incident.matches(end, &slice));
        assert!(!incident.matches(start - chrono::TimeDelta::minutes(1), &slice));
    }

    #[test]
    fn unset_filters_match_anything() {
        let (start, end) = window();
        let incident = Incident::new("broad", IncidentKind::Latency, start, end);
        assert!(incident.matches(start, &test_slice()));
    }

    #[test]
    fn set_filters_must_all_match() {
        let (start, end) = window();
        let incident = Incident::new("scoped", IncidentKind::Latency, start, end)
            .with_partner("partner_01")
            .with_region("us-east");
        let slice = test_slice();
        assert!(incident.matches(start, &slice));

        let other_region = Slice {
            region: "eu-west".to_owned(),
            ..slice
        };
        assert!(!incident.matches(start, &other_region));
    }

    #[test]
    fn latency_inflates_all_percentiles() {
        let (start, end) = window();
        let incident =
            Incident::new("slow", IncidentKind::Latency, start, end).with_intensity(2.0);
        let mut metrics = test_metrics();
        incident.apply(&mut metrics);
        assert_eq!(metrics.p50_ms, 100.0 * 2.6);
        assert_eq!(metrics.p95_ms, 220.0 * 3.6);
        assert_eq!(metrics.p99_ms, 340.0 * 4.4);
    }

    #[test]
    fn cache_collapse_floors_hit_rate() {
        let (start, end) = window();
        let incident =
            Incident::new("collapse", IncidentKind::CacheCollapse, start, end).with_intensity(4.0);
        let mut metrics = test_metrics();
        incident.apply(&mut metrics);
        assert_eq!(metrics.cache_hit_rate, 0.01);
    }

    #[test]
    fn origin_overload_caps_injected_503s() {
        let (start, end) = window();
        let incident = Incident::new("meltdown", IncidentKind::OriginOverload, start, end)
            .with_intensity(1000.0);
        let mut metrics = test_metrics();
        incident.apply(&mut metrics);
        // Injected share clamps at 0.4 of requests regardless of intensity.
        assert_eq!(metrics.status_503, 2 + 4_000);
    }

    #[test]
    fn timeouts_add_504s_and_hit_p99() {
        let (start, end) = window();
        let incident =
            Incident::new("upstream", IncidentKind::Timeouts, start, end).with_intensity(1.0);
        let mut metrics = test_metrics();
        incident.apply(&mut metrics);
        let expected_504 = (10_000f64 * 0.015f64) as u64;
        assert_eq!(metrics.status_504, 2 + expected_504);
        assert_eq!(metrics.p99_ms, 340.0 * 2.4);
        assert_eq!(metrics.p95_ms, 220.0);
    }

    #[test]
    fn crc_spike_scales_with_megabytes() {
        let (start, end) = window();
        let incident =
            Incident::new("corruption", IncidentKind::CrcSpike, start, end).with_intensity(1.0);
        let mut metrics = test_metrics();
        incident.apply(&mut metrics);
        // 9000 MB * 0.25 = 2250 extra errors.
        assert_eq!(metrics.crc_errors, 18 + 2_250);
    }

    #[test]
    fn intensity_floors_at_tenth() {
        let (start, end) = window();
        let incident =
            Incident::new("weak", IncidentKind::Latency, start, end).with_intensity(0.0);
        let mut metrics = test_metrics();
        incident.apply(&mut metrics);
        assert!((metrics.p50_ms - 100.0 * 0.13).abs() < 1e-9);
    }

    #[test]
    fn incidents_compound_in_list_order() {
        let (start, end) = window();
        let first =
            Incident::new("first", IncidentKind::Latency, start, end).with_intensity(1.0);
        let second =
            Incident::new("second", IncidentKind::Timeouts, start, end).with_intensity(1.0);
        let mut metrics = test_metrics();
        apply_incidents(&[first, second], start, &test_slice(), &mut metrics);
        // Timeouts sees the latency-inflated p99: 340 * 2.2 * 2.4.
        assert!((metrics.p99_ms - 340.0 * 2.2 * 2.4).abs() < 1e-9);
        let expected_504 = (10_000f64 * 0.015f64) as u64;
        assert_eq!(metrics.status_504, 2 + expected_504);
    }

    #[test]
    fn fold_reclamps_even_without_matches() {
        let (start, _end) = window();
        let mut metrics = test_metrics();
        metrics.p95_ms = 40.0;
        metrics.p99_ms = 20.0;
        apply_incidents(&[], start, &test_slice(), &mut metrics);
        assert_eq!(metrics.p95_ms, 100.0);
        assert_eq!(metrics.p99_ms, 100.0);
    }

    #[test]
    fn kind_serializes_snake_case() {
        let json = serde_json::to_string(&IncidentKind::CacheCollapse).expect("kind serializes");
        assert_eq!(json, "\"cache_collapse\"");
    }
}
