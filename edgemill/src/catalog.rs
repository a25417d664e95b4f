//! Dimension catalogs and the slice pool.
//!
//! A [`Slice`] is one combination of the seven traffic dimensions. The pool
//! builder draws each dimension independently from its catalog, so the same
//! tuple can appear more than once — repetition is deliberate and acts as an
//! implicit popularity weighting when minutes sample from the pool.

use serde::{Deserialize, Serialize};

use crate::rng::SeededRng;

/// Default service catalog.
pub const DEFAULT_SERVICES: &[&str] = &["live", "vod", "dvr", "eas", "live_ott", "app_backend"];

/// Default content-type catalog.
pub const DEFAULT_CONTENT_TYPES: &[&str] = &["manifest", "segment", "api"];

/// Default region catalog.
pub const DEFAULT_REGIONS: &[&str] = &[
    "us-east",
    "us-west",
    "us-central",
    "eu-west",
    "eu-central",
    "ap-south",
    "ap-northeast",
    "sa-east",
];

/// Default user-agent family catalog.
pub const DEFAULT_UA_FAMILIES: &[&str] = &["stb", "mobile", "web", "smart_tv", "console"];

/// One traffic dimension combination.
///
/// Slices are value types: the pool owns them and emitted rows carry copies
/// of the dimension strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Partner label, e.g. `partner_01`.
    pub partner: String,
    /// Service name, e.g. `live`.
    pub service: String,
    /// Region name, e.g. `us-east`.
    pub region: String,
    /// Point-of-presence label, e.g. `pop_001`.
    pub pop: String,
    /// Edge host label, e.g. `host_0001`.
    pub host: String,
    /// Content type, e.g. `segment`.
    pub content_type: String,
    /// User-agent family, e.g. `mobile`.
    pub ua_family: String,
}

/// The seven value catalogs a generation run samples dimensions from.
///
/// Catalogs must be non-empty; sampling from an empty catalog is a
/// precondition violation and panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionCatalogs {
    /// Partner labels.
    pub partners: Vec<String>,
    /// Service names.
    pub services: Vec<String>,
    /// Region names.
    pub regions: Vec<String>,
    /// Point-of-presence labels.
    pub pops: Vec<String>,
    /// Edge host labels.
    pub hosts: Vec<String>,
    /// Content types.
    pub content_types: Vec<String>,
    /// User-agent families.
    pub ua_families: Vec<String>,
}

/// Generate `prefix_NN` style labels, 1-based and zero-padded to `width`.
pub fn numbered_labels(prefix: &str, count: usize, width: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix}_{i:0width$}")).collect()
}

/// Materialize a default catalog as owned strings.
pub fn owned_catalog(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}

/// Build the fixed slice pool for one generation call.
///
/// Each pool entry draws one value per catalog from the shared seeded
/// source, in fixed dimension order (partner, service, region, pop, host,
/// content type, UA family). The pool is immutable for the rest of the run.
///
/// # Panics
///
/// Panics if any catalog is empty.
pub fn build_slice_pool(
    catalogs: &DimensionCatalogs,
    pool_size: usize,
    rng: &mut SeededRng,
) -> Vec<Slice> {
    (0..pool_size)
        .map(|_| Slice {
            partner: rng.choice(&catalogs.partners).clone(),
            service: rng.choice(&catalogs.services).clone(),
            region: rng.choice(&catalogs.regions).clone(),
            pop: rng.choice(&catalogs.pops).clone(),
            host: rng.choice(&catalogs.hosts).clone(),
            content_type: rng.choice(&catalogs.content_types).clone(),
            ua_family: rng.choice(&catalogs.ua_families).clone(),
        })
        .collect()
}
