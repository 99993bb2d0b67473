//! Point cloud pipeline module
//!
//! This module decodes lc_pcd containers, parses circle detection reports and
//! correlates the two, with separate modules for each stage and for orchestration.

pub mod lc_pcd;
pub mod report;
pub mod correlate;
pub mod conversions;
pub mod common;

pub use common::{
    PcdError,
    Result,
};

pub use lc_pcd::{
    ColorMode,
    ContainerHeader,
    LcPcdData,
    LcPcdReader,
    PointCloudReader,
    PointRecord,
};

pub use report::{
    DetectionRegion,
    RegionOutcome,
    ReportWriter,
    StandardReportWriter,
};

pub use correlate::{
    CloudBounds,
    CorrelationResult,
    RegionMatch,
};

pub use conversions::{
    CorrelationOutput,
    CorrelationPipeline,
    PipelineConfig,
    PipelineConfigBuilder,
};
