//! lc_pcd container reading module
//!
//! Header de-obfuscation, point record decoding, and locating containers on disk.

mod reader;
mod lc_pcd_reader;
pub mod header;
pub mod points;
pub mod discovery;
pub mod types;

pub use reader::PointCloudReader;
pub use lc_pcd_reader::{LcPcdReader, split_container};
pub use header::{XOR_KEY, decode_header, xor_in_place};
pub use points::decode_points;
pub use discovery::{default_report_path, locate_container};
pub use types::{ColorMode, ContainerHeader, LcPcdData, PointRecord};
