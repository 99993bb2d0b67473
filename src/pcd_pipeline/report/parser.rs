//! Detection report parser.
//!
//! Blocks are matched by their literal labels, so the labels must stay exactly as
//! the detection tool writes them:
//!
//! ```text
//! 区域1检测结果:
//! 圆心坐标(原图): (988, 880)
//! 半径: 20像素
//! --------------------------------------------------
//! 区域2未检测到圆
//! --------------------------------------------------
//! ```

use std::str::FromStr;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::pcd_pipeline::common::error::{PcdError, Result};
use crate::pcd_pipeline::report::types::{DetectionRegion, RegionOutcome};

const BLOCK_PATTERN: &str = concat!(
    r"区域(?P<id>\S+?)检测结果:\r?\n",
    r"圆心坐标\(原图\): \((?P<x>[^,\r\n]*), (?P<y>[^)\r\n]*)\)\r?\n",
    r"半径: (?P<r>[^\r\n]*?)像素",
    r"|区域(?P<miss>\S+?)未检测到圆",
);

static BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BLOCK_PATTERN).expect("report block pattern is valid"));

fn parse_field<T: FromStr>(caps: &Captures<'_>, name: &str, what: &str) -> Result<T> {
    let raw = caps.name(name).map(|m| m.as_str()).unwrap_or_default();
    raw.parse::<T>()
        .map_err(|_| PcdError::ParseError(format!("invalid {what}: {raw:?}")))
}

fn parse_region_id(caps: &Captures<'_>, name: &str) -> Result<u32> {
    let id: u32 = parse_field(caps, name, "region id")?;
    if id == 0 {
        return Err(PcdError::ParseError("region id must be positive".to_string()));
    }
    Ok(id)
}

/// Parses every block of a report, detections and misses, in text order.
///
/// Text that matches neither block template is skipped. A block that matches but
/// carries a non-integer field fails the whole report.
pub fn parse_outcomes(text: &str) -> Result<Vec<RegionOutcome>> {
    let mut outcomes = Vec::new();

    for caps in BLOCK_REGEX.captures_iter(text) {
        if caps.name("miss").is_some() {
            let region_id = parse_region_id(&caps, "miss")?;
            debug!(region_id, "No circle detected");
            outcomes.push(RegionOutcome::Missed { region_id });
            continue;
        }

        let region_id = parse_region_id(&caps, "id")?;
        let center_x = parse_field(&caps, "x", "center x")?;
        let center_y = parse_field(&caps, "y", "center y")?;
        let radius = parse_field(&caps, "r", "radius")?;
        let region = DetectionRegion::new(region_id, center_x, center_y, radius);
        debug!(?region, "Parsed detection");
        outcomes.push(RegionOutcome::Detected(region));
    }

    Ok(outcomes)
}

/// Parses the detected regions of a report, in text order.
///
/// An empty report, or one with only misses, yields an empty list.
pub fn parse_report(text: &str) -> Result<Vec<DetectionRegion>> {
    Ok(parse_outcomes(text)?
        .iter()
        .filter_map(RegionOutcome::detection)
        .copied()
        .collect())
}
