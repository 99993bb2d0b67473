use std::io::Write;

use tracing::debug;

use crate::pcd_pipeline::common::error::Result;
use crate::pcd_pipeline::report::types::RegionOutcome;
use crate::pcd_pipeline::report::writer::ReportWriter;

const RULE_WIDTH: usize = 50;

/// Renders a report in the layout the circle detection tool writes.
pub fn format_report(title: &str, outcomes: &[RegionOutcome]) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    let mut text = format!("检测结果 - {title}\n{}\n", "=".repeat(RULE_WIDTH));

    for outcome in outcomes {
        match outcome {
            RegionOutcome::Detected(region) => {
                text.push_str(&format!(
                    "区域{}检测结果:\n圆心坐标(原图): ({}, {})\n半径: {}像素\n",
                    region.region_id, region.center_x, region.center_y, region.radius
                ));
            }
            RegionOutcome::Missed { region_id } => {
                text.push_str(&format!("区域{region_id}未检测到圆\n"));
            }
        }
        text.push_str(&rule);
        text.push('\n');
    }

    text
}

pub struct StandardReportWriter;

impl ReportWriter for StandardReportWriter {
    fn write_report(&self, title: &str, outcomes: &[RegionOutcome], output: &mut dyn Write) -> Result<()> {
        debug!("Writing report with {} blocks", outcomes.len());
        output.write_all(format_report(title, outcomes).as_bytes())?;
        Ok(())
    }
}
