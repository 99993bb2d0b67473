//! Pipeline orchestration module
//!
//! Ties container decoding, report parsing and correlation together.

mod config;
mod correlation_pipeline;

#[cfg(test)]
mod tests;

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use correlation_pipeline::{CorrelationOutput, CorrelationPipeline};
