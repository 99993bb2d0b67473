//! Reader for the lc_pcd container format.
//!
//! A container is a 256-byte obfuscated header followed by `point_count` fixed-size
//! point records. The whole file is expected to be in memory.

use tracing::debug;

use crate::pcd_pipeline::common::error::Result;
use crate::pcd_pipeline::lc_pcd::header::decode_header;
use crate::pcd_pipeline::lc_pcd::points::decode_points;
use crate::pcd_pipeline::lc_pcd::reader::PointCloudReader;
use crate::pcd_pipeline::lc_pcd::types::{ContainerHeader, HEADER_SIZE, LcPcdData};

/// Splits a container into its decoded header and the raw point body.
pub fn split_container(data: &[u8]) -> Result<(ContainerHeader, &[u8])> {
    let header = decode_header(data)?;
    Ok((header, &data[HEADER_SIZE..]))
}

/// Default [`PointCloudReader`] for `.lc_pcd` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct LcPcdReader;

impl PointCloudReader for LcPcdReader {
    /// Decodes a complete container.
    ///
    /// # Errors
    ///
    /// * `PcdError::FormatError` - header shorter than 256 bytes or body shorter than
    ///   `point_count * 13` bytes
    fn read_cloud(&self, data: &[u8]) -> Result<LcPcdData> {
        debug!("Decoding lc_pcd container, {} bytes", data.len());

        let (header, body) = split_container(data)?;
        let points = decode_points(body, header.point_count)?;

        Ok(LcPcdData { header, points })
    }
}
