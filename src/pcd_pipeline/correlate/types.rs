//! Correlation result types

use crate::pcd_pipeline::lc_pcd::types::PointRecord;
use crate::pcd_pipeline::report::types::DetectionRegion;

/// Points whose source pixel falls inside one detection region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMatch {
    pub region: DetectionRegion,
    /// Matched points, in decode order
    pub points: Vec<PointRecord>,
}

impl RegionMatch {
    pub fn region_id(&self) -> u32 {
        self.region.region_id
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean 3D position of the matched points in millimeters.
    pub fn centroid(&self) -> Option<[f64; 3]> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let sum = self.points.iter().fold([0.0f64; 3], |acc, p| {
            [acc[0] + p.x, acc[1] + p.y, acc[2] + p.z]
        });
        Some([sum[0] / n, sum[1] / n, sum[2] / n])
    }
}

/// Region to points mapping, one entry per region in report order.
///
/// Entries with the same `region_id` are kept side by side; [`get`](Self::get)
/// returns the first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationResult {
    entries: Vec<RegionMatch>,
}

impl CorrelationResult {
    pub fn new(entries: Vec<RegionMatch>) -> Self {
        Self { entries }
    }

    pub fn get(&self, region_id: u32) -> Option<&[PointRecord]> {
        self.entries
            .iter()
            .find(|entry| entry.region_id() == region_id)
            .map(|entry| entry.points.as_slice())
    }

    pub fn entries(&self) -> &[RegionMatch] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionMatch> {
        self.entries.iter()
    }

    /// Number of regions, matched or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|entry| entry.points.len()).sum()
    }
}
