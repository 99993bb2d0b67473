//! Decoding of lc_pcd point-cloud containers and correlation of their points
//! against circle detection reports.

pub mod logger;
pub mod pcd_pipeline;
