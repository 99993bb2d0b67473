//! Summary statistics over decoded points.

use crate::pcd_pipeline::lc_pcd::types::PointRecord;

/// Per-axis extent of a point cloud in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudBounds {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl CloudBounds {
    /// Returns `None` for an empty cloud.
    pub fn from_points(points: &[PointRecord]) -> Option<Self> {
        let first = points.first()?.position();
        let mut bounds = CloudBounds {
            min: first,
            max: first,
        };
        for point in &points[1..] {
            let position = point.position();
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(position[axis]);
                bounds.max[axis] = bounds.max[axis].max(position[axis]);
            }
        }
        Some(bounds)
    }

    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
