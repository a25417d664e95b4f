//! Generation entry point: configuration, the per-minute loop, and row
//! assembly.

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use crate::catalog::{
    build_slice_pool, numbered_labels, owned_catalog, DimensionCatalogs, Slice,
    DEFAULT_CONTENT_TYPES, DEFAULT_REGIONS, DEFAULT_SERVICES, DEFAULT_UA_FAMILIES,
};
use crate::incident::{apply_incidents, Incident};
use crate::record::MinuteRecord;
use crate::rng::SeededRng;
use crate::sampler::{sample_slice_metrics, SliceMetrics};
use crate::status::{allocate_status_buckets, StatusBuckets};
use crate::time::floor_to_minute;
use crate::traffic::diurnal_multiplier;

/// Number of slices a minute samples at minimum, regardless of density.
///
/// A deliberate lower bound so small-density runs remain non-trivial; a
/// `density` of zero still produces fifty active slices per minute.
pub const MIN_SLICES_PER_MINUTE: usize = 50;

/// Configuration for one generation run.
///
/// `Default` mirrors the canonical run: six partners, twenty PoPs, one
/// hundred twenty hosts, seed 7, 10% density, a five-thousand-entry slice
/// pool, no incidents, one hour starting at the epoch minute.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// UTC start of the run; floored to the whole minute.
    pub start: DateTime<Utc>,
    /// Number of minutes to generate.
    pub minutes: u32,
    /// Number of generated partner labels.
    pub partners: usize,
    /// Number of generated PoP labels.
    pub pops: usize,
    /// Number of generated host labels.
    pub hosts: usize,
    /// Service catalog override; defaults when `None`.
    pub services: Option<Vec<String>>,
    /// Region catalog override; defaults when `None`.
    pub regions: Option<Vec<String>>,
    /// Content-type catalog override; defaults when `None`.
    pub content_types: Option<Vec<String>>,
    /// UA-family catalog override; defaults when `None`.
    pub ua_families: Option<Vec<String>>,
    /// Seed for the run's random source, recorded on every row.
    pub seed: u64,
    /// Incidents to inject, applied in list order.
    pub incidents: Vec<Incident>,
    /// Fraction of the pool active per minute, in `[0, 1]`.
    pub density: f64,
    /// Size of the candidate slice pool.
    pub pool_size: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start: DateTime::<Utc>::UNIX_EPOCH,
            minutes: 60,
            partners: 6,
            pops: 20,
            hosts: 120,
            services: None,
            regions: None,
            content_types: None,
            ua_families: None,
            seed: 7,
            incidents: Vec::new(),
            density: 0.10,
            pool_size: 5000,
        }
    }
}

impl GeneratorConfig {
    /// Materialize the run's dimension catalogs, applying overrides.
    fn catalogs(&self) -> DimensionCatalogs {
        DimensionCatalogs {
            partners: numbered_labels("partner", self.partners, 2),
            services: self
                .services
                .clone()
                .unwrap_or_else(|| owned_catalog(DEFAULT_SERVICES)),
            regions: self
                .regions
                .clone()
                .unwrap_or_else(|| owned_catalog(DEFAULT_REGIONS)),
            pops: numbered_labels("pop", self.pops, 3),
            hosts: numbered_labels("host", self.hosts, 4),
            content_types: self
                .content_types
                .clone()
                .unwrap_or_else(|| owned_catalog(DEFAULT_CONTENT_TYPES)),
            ua_families: self
                .ua_families
                .clone()
                .unwrap_or_else(|| owned_catalog(DEFAULT_UA_FAMILIES)),
        }
    }

    /// Active slice count per minute: `max(50, ⌊pool × density⌋)`, clamped
    /// to the pool size (a larger draw cannot be taken without
    /// replacement).
    fn slices_per_minute(&self, pool_len: usize) -> usize {
        let scaled = (pool_len as f64 * self.density).floor() as usize;
        scaled.max(MIN_SLICES_PER_MINUTE).min(pool_len)
    }
}

/// Deterministic minute-telemetry generator.
///
/// Stateless across calls: each [`generate`](Self::generate) builds a fresh
/// pool and random source from the config, so repeated calls with the same
/// config return identical datasets.
#[derive(Debug, Clone)]
pub struct TelemetryGenerator {
    config: GeneratorConfig,
}

impl TelemetryGenerator {
    /// Create a generator for the given configuration.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// The generator's configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the dataset: one row per slice-minute with non-zero
    /// traffic, in generation order.
    ///
    /// Single pass, single thread, no I/O. The shared random source is
    /// consumed in a fixed order — pool construction, then per minute the
    /// slice selection and per-slice metric draws — which is what makes
    /// equal seeds yield equal datasets.
    pub fn generate(&self) -> Vec<MinuteRecord> {
        let config = &self.config;
        let mut rng = SeededRng::new(config.seed);
        let catalogs = config.catalogs();
        let pool = build_slice_pool(&catalogs, config.pool_size, &mut rng);
        let start = floor_to_minute(config.start);

        let mut rows = Vec::new();
        for minute in 0..config.minutes {
            let ts = start + TimeDelta::minutes(i64::from(minute));
            let mult = diurnal_multiplier(ts.hour());
            let active = config.slices_per_minute(pool.len());
            let indices = rng.sample_indices(pool.len(), active);
            tracing::debug!(minute, ts = %ts, active, "sampling minute");

            for idx in indices {
                let slice = &pool[idx];
                let Some(mut metrics) = sample_slice_metrics(&mut rng, slice, mult) else {
                    continue;
                };
                apply_incidents(&config.incidents, ts, slice, &mut metrics);
                let buckets = allocate_status_buckets(&mut rng, &metrics, slice);
                rows.push(assemble_row(config.seed, ts, slice, &metrics, buckets));
            }
        }

        tracing::info!(
            rows = rows.len(),
            seed = config.seed,
            minutes = config.minutes,
            incidents = config.incidents.len(),
            "generated telemetry dataset"
        );
        rows
    }
}

/// Package finalized metrics into the fixed output schema.
fn assemble_row(
    seed: u64,
    ts: DateTime<Utc>,
    slice: &Slice,
    metrics: &SliceMetrics,
    buckets: StatusBuckets,
) -> MinuteRecord {
    MinuteRecord {
        seed,
        ts,
        partner: slice.partner.clone(),
        service: slice.service.clone(),
        region: slice.region.clone(),
        pop: slice.pop.clone(),
        host: slice.host.clone(),
        content_type: slice.content_type.clone(),
        ua_family: slice.ua_family.clone(),
        requests: metrics.requests,
        bytes_sent: metrics.bytes_sent,
        p50_ms: metrics.p50_ms,
        p95_ms: metrics.p95_ms,
        p99_ms: metrics.p99_ms,
        cache_hit_rate: metrics.cache_hit_rate,
        http_2xx_count: buckets.http_2xx,
        http_3xx_count: buckets.http_3xx,
        http_4xx_count: buckets.http_4xx,
        http_5xx_count: buckets.http_5xx,
        status_500: metrics.status_500,
        status_502: metrics.status_502,
        status_503: metrics.status_503,
        status_504: metrics.status_504,
        crc_errors: metrics.crc_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_canonical_run() {
        let config = GeneratorConfig::default();
        assert_eq!(config.minutes, 60);
        assert_eq!(config.partners, 6);
        assert_eq!(config.pops, 20);
        assert_eq!(config.hosts, 120);
        assert_eq!(config.seed, 7);
        assert_eq!(config.density, 0.10);
        assert_eq!(config.pool_size, 5000);
        assert!(config.incidents.is_empty());
    }

    #[test]
    fn density_floor_keeps_minutes_non_trivial() {
        let config = GeneratorConfig {
            density: 0.0,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.slices_per_minute(5000), MIN_SLICES_PER_MINUTE);

        let negative = GeneratorConfig {
            density: -1.0,
            ..GeneratorConfig::default()
        };
        assert_eq!(negative.slices_per_minute(5000), MIN_SLICES_PER_MINUTE);
    }

    #[test]
    fn density_scales_with_pool() {
        let config = GeneratorConfig {
            density: 0.10,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.slices_per_minute(5000), 500);
    }

    #[test]
    fn slice_count_clamps_to_pool() {
        let config = GeneratorConfig {
            density: 0.0,
            ..GeneratorConfig::default()
        };
        // Pools smaller than the floor cannot be over-sampled.
        assert_eq!(config.slices_per_minute(10), 10);
    }

    #[test]
    fn zero_minutes_is_a_valid_empty_run() {
        let config = GeneratorConfig {
            minutes: 0,
            ..GeneratorConfig::default()
        };
        let rows = TelemetryGenerator::new(config).generate();
        assert!(rows.is_empty());
    }

    #[test]
    fn start_is_floored_to_the_minute() {
        use chrono::TimeZone;
        let config = GeneratorConfig {
            start: Utc.with_ymd_and_hms(2026, 2, 20, 12, 30, 45).unwrap(),
            minutes: 1,
            density: 0.0,
            pool_size: 100,
            ..GeneratorConfig::default()
        };
        let rows = TelemetryGenerator::new(config).generate();
        let expected = Utc.with_ymd_and_hms(2026, 2, 20, 12, 30, 0).unwrap();
        assert!(rows.iter().all(|row| row.ts == expected));
        assert!(!rows.is_empty());
    }
}
