//! Point record decoder.
//!
//! Record layout, 13 bytes, little-endian:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | r |
//! | 1 | 1 | g |
//! | 2 | 1 | b |
//! | 3 | 2 | x (i16, 0.1 mm) |
//! | 5 | 2 | y (i16, 0.1 mm) |
//! | 7 | 2 | z (i16, 0.1 mm) |
//! | 9 | 2 | wPos (i16, pixel column) |
//! | 11 | 2 | hPos (i16, pixel row) |

use tracing::debug;

use crate::pcd_pipeline::common::error::{PcdError, Result};
use crate::pcd_pipeline::lc_pcd::types::{POINT_RECORD_SIZE, PointRecord};

/// Millimeters per raw coordinate unit.
pub const MM_PER_UNIT: f64 = 0.1;

#[inline]
fn read_i16(record: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([record[offset], record[offset + 1]])
}

/// Decodes a single 13-byte record.
fn decode_record(record: &[u8]) -> PointRecord {
    PointRecord {
        r: record[0],
        g: record[1],
        b: record[2],
        x: read_i16(record, 3) as f64 * MM_PER_UNIT,
        y: read_i16(record, 5) as f64 * MM_PER_UNIT,
        z: read_i16(record, 7) as f64 * MM_PER_UNIT,
        w_pos: read_i16(record, 9),
        h_pos: read_i16(record, 11),
    }
}

/// Decodes exactly `point_count` records from the start of `body`.
///
/// The whole body is validated before anything is decoded, so on error no points
/// are returned. Bytes beyond the last record are ignored.
///
/// # Errors
///
/// Returns `PcdError::FormatError` when `body` holds fewer than
/// `point_count * 13` bytes.
pub fn decode_points(body: &[u8], point_count: u32) -> Result<Vec<PointRecord>> {
    let required = (point_count as usize)
        .checked_mul(POINT_RECORD_SIZE)
        .ok_or_else(|| PcdError::FormatError("malformed point count".to_string()))?;

    if body.len() < required {
        debug!(
            "Body holds {} bytes, {} records need {}",
            body.len(),
            point_count,
            required
        );
        return Err(PcdError::FormatError("point data truncated".to_string()));
    }

    if body.len() > required {
        debug!("Ignoring {} trailing body bytes", body.len() - required);
    }

    let points: Vec<PointRecord> = body[..required]
        .chunks_exact(POINT_RECORD_SIZE)
        .map(decode_record)
        .collect();

    debug!("Decoded {} point records", points.len());
    Ok(points)
}
