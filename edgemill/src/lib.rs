//! # Edgemill
//!
//! Deterministic synthetic CDN telemetry at per-minute, per-slice
//! granularity, for exercising downstream analytics and ingestion pipelines
//! without real production data.
//!
//! ## Why Deterministic Generation?
//!
//! Pipelines under test need datasets that are realistic *and*
//! reproducible: a fixture you can regenerate byte-for-byte from a seed
//! beats a checked-in CSV that drifts out of date. Everything stochastic in
//! this crate flows through one owned, seeded random source consumed in a
//! fixed documented order, so the same configuration always yields the same
//! dataset.
//!
//! Key properties:
//! - **Reproducible**: same seed and config produce an identical dataset
//! - **Realistic**: diurnal load curve, per-service/per-content-type rate
//!   tables, heavy-tailed latency draws
//! - **Faultable**: incidents inject outages into bounded time windows and
//!   dimension subsets
//!
//! ## Core Components
//!
//! - [`GeneratorConfig`] / [`TelemetryGenerator`]: configure and run a
//!   generation call
//! - [`catalog`]: dimension catalogs and the weighted slice pool
//! - [`sampler`]: per-slice-minute metric draws
//! - [`incident`]: windowed, filtered fault injection
//! - [`status`]: HTTP status-class bucket allocation
//! - [`emit`]: CSV and line-delimited JSON sinks
//!
//! ## Quick Start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use edgemill::{GeneratorConfig, TelemetryGenerator};
//!
//! let config = GeneratorConfig {
//!     start: Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap(),
//!     minutes: 2,
//!     ..GeneratorConfig::default()
//! };
//! let rows = TelemetryGenerator::new(config).generate();
//! assert!(!rows.is_empty());
//! for row in &rows {
//!     assert!(row.requests > 0);
//!     assert_eq!(
//!         row.http_5xx_count,
//!         row.status_500 + row.status_502 + row.status_503 + row.status_504,
//!     );
//! }
//! ```
//!
//! ## Injecting an Incident
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use edgemill::{GeneratorConfig, Incident, IncidentKind, TelemetryGenerator};
//!
//! let start = Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap();
//! let incident = Incident::new(
//!     "us-east origin brownout",
//!     IncidentKind::OriginOverload,
//!     start,
//!     start + TimeDelta::minutes(30),
//! )
//! .with_region("us-east")
//! .with_intensity(2.0);
//!
//! let config = GeneratorConfig {
//!     start,
//!     minutes: 2,
//!     incidents: vec![incident],
//!     ..GeneratorConfig::default()
//! };
//! let rows = TelemetryGenerator::new(config).generate();
//! assert!(rows.iter().any(|row| row.region == "us-east" && row.status_503 > 0));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]

pub mod catalog;
pub mod emit;
pub mod error;
pub mod generator;
pub mod incident;
pub mod record;
pub mod rng;
pub mod sampler;
pub mod status;
pub mod time;
pub mod traffic;

pub use catalog::{DimensionCatalogs, Slice};
pub use emit::{write_jsonl, write_raw_minute_csv};
pub use error::{TelemetryError, TelemetryResult};
pub use generator::{GeneratorConfig, TelemetryGenerator, MIN_SLICES_PER_MINUTE};
pub use incident::{Incident, IncidentKind};
pub use record::{MinuteRecord, RAW_MINUTE_COLUMNS};
pub use rng::SeededRng;
pub use traffic::diurnal_multiplier;
