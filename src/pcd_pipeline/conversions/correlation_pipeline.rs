use std::path::Path;

use tracing::{info, instrument, warn};

use crate::pcd_pipeline::{
    common::error::{PcdError, Result},
    conversions::config::PipelineConfig,
    correlate::{CloudBounds, CorrelationResult, correlate_with},
    lc_pcd::{ContainerHeader, LcPcdReader, PointCloudReader, PointRecord},
    report::{DetectionRegion, parse_report},
};

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct CorrelationOutput {
    pub header: ContainerHeader,
    pub points: Vec<PointRecord>,
    /// `None` when the container holds no points
    pub bounds: Option<CloudBounds>,
    pub correlation: CorrelationResult,
}

pub struct CorrelationPipeline<R: PointCloudReader> {
    reader: R,
    config: PipelineConfig,
}

impl CorrelationPipeline<LcPcdReader> {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            reader: LcPcdReader,
            config,
        }
    }
}

impl<R: PointCloudReader> CorrelationPipeline<R> {
    pub fn with_custom(reader: R, config: PipelineConfig) -> Self {
        Self { reader, config }
    }

    fn validate_counts(&self, header: &ContainerHeader) -> Result<()> {
        let expected = header
            .expected_body_len()
            .ok_or_else(|| PcdError::FormatError("malformed counts".to_string()))?;

        if header.data_size as usize == expected {
            return Ok(());
        }

        if self.config.check_data_size {
            return Err(PcdError::FormatError(format!(
                "malformed counts: data_size {} does not match {} points",
                header.data_size, header.point_count
            )));
        }

        warn!(
            data_size = header.data_size,
            point_count = header.point_count,
            "Header data_size does not match point count"
        );
        Ok(())
    }

    fn limit_regions<'a>(&self, regions: &'a [DetectionRegion]) -> &'a [DetectionRegion] {
        match self.config.max_regions {
            Some(max) if regions.len() > max => {
                warn!(
                    "Report has {} regions, correlating the first {}",
                    regions.len(),
                    max
                );
                &regions[..max]
            }
            _ => regions,
        }
    }

    /// Decodes a container and correlates its points with already parsed regions.
    #[instrument(skip(self, container, regions), fields(container_size = container.len(), regions = regions.len()))]
    pub fn correlate(
        &self,
        container: &[u8],
        regions: &[DetectionRegion],
    ) -> Result<CorrelationOutput> {
        let cloud = {
            let _span = tracing::info_span!("decode_container").entered();
            self.reader.read_cloud(container)?
        };

        {
            let _span = tracing::info_span!("validate_counts").entered();
            self.validate_counts(&cloud.header)?;
        }

        let bounds = CloudBounds::from_points(&cloud.points);

        let correlation = {
            let regions = self.limit_regions(regions);
            let _span = tracing::info_span!(
                "correlate_regions",
                points = cloud.points.len(),
                regions = regions.len(),
                parallel = self.config.parallel
            )
            .entered();
            correlate_with(&cloud.points, regions, self.config.parallel)
        };

        info!(
            points = cloud.points.len(),
            regions = correlation.len(),
            matched = correlation.total_matches(),
            "Correlation complete"
        );

        Ok(CorrelationOutput {
            header: cloud.header,
            points: cloud.points,
            bounds,
            correlation,
        })
    }

    /// Decodes a container and correlates it against the text of a detection report.
    pub fn run(&self, container: &[u8], report: &str) -> Result<CorrelationOutput> {
        let regions = {
            let _span = tracing::info_span!("parse_report").entered();
            parse_report(report)?
        };
        info!("Parsed {} detection regions", regions.len());

        self.correlate(container, &regions)
    }

    /// File-based variant of [`run`](Self::run). Without a report path the
    /// container is decoded and correlated against no regions.
    #[instrument(skip(self, container_path, report_path))]
    pub fn run_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        container_path: P,
        report_path: Option<Q>,
    ) -> Result<CorrelationOutput> {
        let container_path = container_path.as_ref();

        info!(container = %container_path.display(), "Reading container");

        let container = {
            let _span = tracing::info_span!("read_container_file").entered();
            std::fs::read(container_path).map_err(|e| {
                PcdError::InputReadError(format!("{}: {}", container_path.display(), e))
            })?
        };

        let Some(report_path) = report_path else {
            return self.correlate(&container, &[]);
        };
        let report_path = report_path.as_ref();

        info!(report = %report_path.display(), "Reading detection report");

        let report = {
            let _span = tracing::info_span!("read_report_file").entered();
            std::fs::read_to_string(report_path).map_err(|e| {
                PcdError::InputReadError(format!("{}: {}", report_path.display(), e))
            })?
        };

        self.run(&container, &report)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PipelineConfig) {
        self.config = config;
    }
}
