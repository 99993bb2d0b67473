use crate::pcd_pipeline::common::error::Result;
use crate::pcd_pipeline::lc_pcd::types::LcPcdData;

pub trait PointCloudReader {
    fn read_cloud(&self, data: &[u8]) -> Result<LcPcdData>;
}
