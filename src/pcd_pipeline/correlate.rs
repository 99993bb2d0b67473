//! Region correlation module
//!
//! Matches decoded points to detection regions in image space and summarizes the
//! matches in 3D.

mod correlator;
pub mod stats;
pub mod types;

pub use correlator::{correlate, correlate_with};
pub use stats::CloudBounds;
pub use types::{CorrelationResult, RegionMatch};
