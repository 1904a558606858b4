//! Line Decoder
//!
//! Parses one comma-separated text record into a [`SensorSample`].
//!
//! Decoding is deliberately lossy: the glove streams at sensor rate over a
//! best-effort transport, so a record with the wrong field count or a field
//! that fails numeric parse is dropped without surfacing an error. The caller
//! sees `None` and the pipeline state is unchanged for that cycle.

use crate::pipeline::sample::SensorSample;
use tracing::trace;

/// Decode one UTF-8 text record into a sensor sample.
///
/// Expects exactly [`SensorSample::FIELD_COUNT`] comma-separated decimal
/// numbers in wire order. Whitespace around individual fields is tolerated.
/// Fields must be finite: the textual `NaN`/`inf` forms the float parser
/// accepts are not valid sensor readings, and a NaN that slipped through
/// would survive clamping and stick to the cursor. Returns `None` for any
/// malformed record.
pub fn decode_line(line: &str) -> Option<SensorSample> {
    let mut fields = [0.0f64; SensorSample::FIELD_COUNT];
    let mut count = 0;

    for part in line.split(',') {
        if count == SensorSample::FIELD_COUNT {
            // Too many fields
            trace!("Dropping record with excess fields");
            return None;
        }
        match part.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                fields[count] = value;
                count += 1;
            }
            Ok(_) => {
                trace!("Dropping record with non-finite field: {:?}", part);
                return None;
            }
            Err(_) => {
                trace!("Dropping record with non-numeric field: {:?}", part);
                return None;
            }
        }
    }

    if count != SensorSample::FIELD_COUNT {
        trace!("Dropping record with {} fields", count);
        return None;
    }

    Some(SensorSample::from_fields(fields))
}

/// Encode a sample back to its wire record form.
///
/// Used by tests and the recording sink; `decode_line(&encode_line(s))`
/// reproduces `s` field for field.
pub fn encode_line(sample: &SensorSample) -> String {
    sample
        .to_fields()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
