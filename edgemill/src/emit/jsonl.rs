//! Line-delimited JSON sink.

use std::io::Write;

use crate::error::TelemetryResult;
use crate::record::MinuteRecord;

/// Write one compact JSON object per row.
///
/// Field order follows the column contract (serde emits the record's
/// declared field order) and `ts` is naive UTC `YYYY-MM-DD HH:MM:SS` with
/// no timezone suffix. An empty dataset writes nothing.
///
/// # Errors
///
/// Returns an error when serialization or the underlying writer fails.
pub fn write_jsonl<W: Write>(records: &[MinuteRecord], out: &mut W) -> TelemetryResult<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
