//! Region correlator.
//!
//! Every region is scanned against every point. Scans only read the point slice,
//! so regions can be handed to the rayon pool independently and collected back in
//! report order.

use rayon::prelude::*;
use tracing::debug;

use crate::pcd_pipeline::correlate::types::{CorrelationResult, RegionMatch};
use crate::pcd_pipeline::lc_pcd::types::PointRecord;
use crate::pcd_pipeline::report::types::DetectionRegion;

fn match_region(points: &[PointRecord], region: &DetectionRegion) -> RegionMatch {
    let matched: Vec<PointRecord> = points
        .iter()
        .filter(|p| region.contains_pixel(p.w_pos, p.h_pos))
        .copied()
        .collect();

    debug!(
        region_id = region.region_id,
        matched = matched.len(),
        "Scanned region"
    );

    RegionMatch {
        region: *region,
        points: matched,
    }
}

/// Selects, for each region, the points whose `(w_pos, h_pos)` lies within the
/// region's circle (boundary included).
pub fn correlate(points: &[PointRecord], regions: &[DetectionRegion]) -> CorrelationResult {
    correlate_with(points, regions, true)
}

/// Same as [`correlate`], with the per-region scans optionally run sequentially.
pub fn correlate_with(
    points: &[PointRecord],
    regions: &[DetectionRegion],
    parallel: bool,
) -> CorrelationResult {
    let entries: Vec<RegionMatch> = if parallel {
        regions
            .par_iter()
            .map(|region| match_region(points, region))
            .collect()
    } else {
        regions
            .iter()
            .map(|region| match_region(points, region))
            .collect()
    };

    CorrelationResult::new(entries)
}
