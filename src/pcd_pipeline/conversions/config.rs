//! Pipeline configuration types

/// Configuration for decoding and correlation
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Scan regions on the rayon thread pool
    pub parallel: bool,
    /// Reject containers whose header `data_size` disagrees with `point_count`
    pub check_data_size: bool,
    /// Only correlate the first N detected regions, in report order
    pub max_regions: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            check_data_size: false,
            max_regions: None,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }
}

/// Builder for PipelineConfig
#[derive(Default)]
pub struct PipelineConfigBuilder {
    parallel: Option<bool>,
    check_data_size: Option<bool>,
    max_regions: Option<Option<usize>>,
}

impl PipelineConfigBuilder {
    pub fn parallel(mut self, enable: bool) -> Self {
        self.parallel = Some(enable);
        self
    }

    pub fn check_data_size(mut self, enable: bool) -> Self {
        self.check_data_size = Some(enable);
        self
    }

    pub fn max_regions(mut self, max: Option<usize>) -> Self {
        self.max_regions = Some(max);
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig {
            parallel: self.parallel.unwrap_or(default.parallel),
            check_data_size: self.check_data_size.unwrap_or(default.check_data_size),
            max_regions: self.max_regions.unwrap_or(default.max_regions),
        }
    }
}
