//! CSV sink with stable column order.

use std::fs;
use std::path::Path;

use crate::error::TelemetryResult;
use crate::record::{MinuteRecord, RAW_MINUTE_COLUMNS};
use crate::time::format_iso_utc;

/// Render one column of a record, or `None` for a column the schema does
/// not declare (written as an empty field, the CSV rendition of null).
fn field_value(record: &MinuteRecord, column: &str) -> Option<String> {
    let value = match column {
        "seed" => record.seed.to_string(),
        "ts" => format_iso_utc(record.ts),
        "partner" => record.partner.clone(),
        "service" => record.service.clone(),
        "region" => record.region.clone(),
        "pop" => record.pop.clone(),
        "host" => record.host.clone(),
        "content_type" => record.content_type.clone(),
        "ua_family" => record.ua_family.clone(),
        "requests" => record.requests.to_string(),
        "bytes_sent" => record.bytes_sent.to_string(),
        "p50_ms" => record.p50_ms.to_string(),
        "p95_ms" => record.p95_ms.to_string(),
        "p99_ms" => record.p99_ms.to_string(),
        "cache_hit_rate" => record.cache_hit_rate.to_string(),
        "http_2xx_count" => record.http_2xx_count.to_string(),
        "http_3xx_count" => record.http_3xx_count.to_string(),
        "http_4xx_count" => record.http_4xx_count.to_string(),
        "http_5xx_count" => record.http_5xx_count.to_string(),
        "status_500" => record.status_500.to_string(),
        "status_502" => record.status_502.to_string(),
        "status_503" => record.status_503.to_string(),
        "status_504" => record.status_504.to_string(),
        "crc_errors" => record.crc_errors.to_string(),
        _ => return None,
    };
    Some(value)
}

/// Write raw minute telemetry to a CSV file with stable column order.
///
/// Parent directories are created as needed. `columns` selects and orders
/// the emitted columns; `None` means the full
/// [`RAW_MINUTE_COLUMNS`] contract. A requested column the schema does not
/// declare is emitted as an empty field rather than rejected. `ts` is
/// formatted `YYYY-MM-DDTHH:MM:SSZ`. An empty dataset produces a
/// header-only file.
///
/// # Errors
///
/// Returns an error when the file cannot be created or a row fails to
/// serialize.
pub fn write_raw_minute_csv(
    records: &[MinuteRecord],
    out_path: impl AsRef<Path>,
    columns: Option<&[&str]>,
) -> TelemetryResult<()> {
    let out_path = out_path.as_ref();
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let columns = columns.unwrap_or(&RAW_MINUTE_COLUMNS);
    let mut writer = csv::Writer::from_path(out_path)?;
    writer.write_record(columns)?;
    for record in records {
        writer.write_record(
            columns
                .iter()
                .map(|column| field_value(record, column).unwrap_or_default()),
        )?;
    }
    writer.flush()?;
    Ok(())
}
