//! The emitted row and its column contract.
//!
//! `RAW_MINUTE_COLUMNS` is append-only: existing names are never renamed or
//! reordered, new columns only go on the end. [`MinuteRecord`] declares its
//! fields in exactly that order, which is what makes the JSON sink's field
//! order fall out of plain serde derivation.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::time::format_naive_utc;

/// Stable column order for raw minute telemetry.
pub const RAW_MINUTE_COLUMNS: [&str; 24] = [
    // Provenance
    "seed",
    // Slice dimensions
    "ts",
    "partner",
    "service",
    "region",
    "pop",
    "host",
    "content_type",
    "ua_family",
    // Core metrics
    "requests",
    "bytes_sent",
    "p50_ms",
    "p95_ms",
    "p99_ms",
    "cache_hit_rate",
    // Status buckets (sum to requests)
    "http_2xx_count",
    "http_3xx_count",
    "http_4xx_count",
    "http_5xx_count",
    // Detailed 5xx breakdown (subset of http_5xx_count)
    "status_500",
    "status_502",
    "status_503",
    "status_504",
    // Other signals
    "crc_errors",
];

fn ts_naive_utc<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_naive_utc(*ts))
}

/// One minute of telemetry for one traffic slice.
///
/// Field order mirrors [`RAW_MINUTE_COLUMNS`]. The serde representation
/// formats `ts` as naive UTC (the line-delimited JSON wire format); the CSV
/// sink formats fields itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MinuteRecord {
    /// Seed the dataset was generated from.
    pub seed: u64,
    /// Minute timestamp, UTC.
    #[serde(serialize_with = "ts_naive_utc")]
    pub ts: DateTime<Utc>,
    /// Partner label.
    pub partner: String,
    /// Service name.
    pub service: String,
    /// Region name.
    pub region: String,
    /// Point-of-presence label.
    pub pop: String,
    /// Edge host label.
    pub host: String,
    /// Content type.
    pub content_type: String,
    /// User-agent family.
    pub ua_family: String,
    /// Total requests served. Always positive.
    pub requests: u64,
    /// Bytes sent to clients.
    pub bytes_sent: u64,
    /// Median latency, milliseconds.
    pub p50_ms: f64,
    /// 95th percentile latency, milliseconds.
    pub p95_ms: f64,
    /// 99th percentile latency, milliseconds.
    pub p99_ms: f64,
    /// Cache hit rate in `[0.01, 0.99]`.
    pub cache_hit_rate: f64,
    /// Successful responses.
    pub http_2xx_count: u64,
    /// Redirects.
    pub http_3xx_count: u64,
    /// Client errors.
    pub http_4xx_count: u64,
    /// Server errors.
    pub http_5xx_count: u64,
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn column_contract_is_stable() {
        let expected = [
            "seed",
            "ts",
            "partner",
            "service",
            "region",
            "pop",
            "host",
            "content_type",
            "ua_family",
            "requests",
            "bytes_sent",
            "p50_ms",
            "p95_ms",
            "p99_ms",
            "cache_hit_rate",
            "http_2xx_count",
            "http_3xx_count",
            "http_4xx_count",
            "http_5xx_count",
            "status_500",
            "status_502",
            "status_503",
            "status_504",
            "crc_errors",
        ];
        assert_eq!(RAW_MINUTE_COLUMNS, expected);
    }

    #[test]
    fn serde_fields_follow_column_order() {
        let record = MinuteRecord {
            seed: 7,
            ts: Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap(),
            partner: "partner_01".to_owned(),
            service: "live".to_owned(),
            region: "us-east".to_owned(),
            pop: "pop_001".to_owned(),
            host: "host_0001".to_owned(),
            content_type: "segment".to_owned(),
            ua_family: "stb".to_owned(),
            requests: 100,
            bytes_sent: 1_000_000,
            p50_ms: 95.0,
            p95_ms: 210.0,
            p99_ms: 320.0,
            cache_hit_rate: 0.9,
            http_2xx_count: 97,
            http_3xx_count: 2,
            http_4xx_count: 1,
            http_5xx_count: 0,
            status_500: 0,
            status_502: 0,
            status_503: 0,
            status_504: 0,
            crc_errors: 0,
        };
        let json = serde_json::to_string(&record).expect("record serializes");
        assert!(json.starts_with("{\"seed\":7,\"ts\":\"2026-02-20 00:00:00\","));
        let key_positions: Vec<usize> = RAW_MINUTE_COLUMNS
            .iter()
            .map(|col| json.find(&format!("\"{col}\":")).expect("column present"))
            .collect();
        assert!(key_positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
