//! Detection report module
//!
//! Reading and writing the text reports produced by the circle detection step.

mod writer;
mod standard_report_writer;
pub mod parser;
pub mod types;

pub use writer::ReportWriter;
pub use standard_report_writer::{StandardReportWriter, format_report};
pub use parser::{parse_outcomes, parse_report};
pub use types::{DetectionRegion, RegionOutcome};
