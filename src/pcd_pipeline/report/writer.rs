use std::io::Write;
use crate::pcd_pipeline::common::error::Result;
use crate::pcd_pipeline::report::types::RegionOutcome;

pub trait ReportWriter {
    fn write_report(&self, title: &str, outcomes: &[RegionOutcome], output: &mut dyn Write) -> Result<()>;
}
