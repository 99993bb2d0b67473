//! Detection report types

/// A circle found by the detection step, in source image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionRegion {
    /// 1-based ordinal of the annotated region in the report
    pub region_id: u32,
    pub center_x: i32,
    pub center_y: i32,
    /// Radius in pixels
    pub radius: u32,
}

impl DetectionRegion {
    pub fn new(region_id: u32, center_x: i32, center_y: i32, radius: u32) -> Self {
        Self {
            region_id,
            center_x,
            center_y,
            radius,
        }
    }

    /// Closed inclusion test in pixel space: points exactly `radius` away are inside.
    #[inline]
    pub fn contains_pixel(&self, w_pos: i16, h_pos: i16) -> bool {
        // u128: the largest i32 center and u32 radius still square without wrapping
        let dx = (w_pos as i64).abs_diff(self.center_x as i64) as u128;
        let dy = (h_pos as i64).abs_diff(self.center_y as i64) as u128;
        let r = self.radius as u128;
        dx * dx + dy * dy <= r * r
    }
}

/// One block of a detection report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOutcome {
    Detected(DetectionRegion),
    /// The detector ran on this region and found no circle
    Missed { region_id: u32 },
}

impl RegionOutcome {
    pub fn region_id(&self) -> u32 {
        match self {
            RegionOutcome::Detected(region) => region.region_id,
            RegionOutcome::Missed { region_id } => *region_id,
        }
    }

    pub fn detection(&self) -> Option<&DetectionRegion> {
        match self {
            RegionOutcome::Detected(region) => Some(region),
            RegionOutcome::Missed { .. } => None,
        }
    }
}
