use std::io::Write;

use crate::pcd_pipeline::common::error::{PcdError, Result};
use crate::pcd_pipeline::conversions::{CorrelationPipeline, PipelineConfig};
use crate::pcd_pipeline::lc_pcd::{
    ColorMode, ContainerHeader, LcPcdData, PointCloudReader, PointRecord, xor_in_place,
};
use crate::pcd_pipeline::report::DetectionRegion;

const REPORT: &str = "检测结果 - scan\n\
    ==================================================\n\
    区域1检测结果:\n圆心坐标(原图): (10, 10)\n半径: 2像素\n\
    --------------------------------------------------\n\
    区域2未检测到圆\n\
    --------------------------------------------------\n\
    区域3检测结果:\n圆心坐标(原图): (30, 10)\n半径: 2像素\n\
    --------------------------------------------------\n";

struct MockReader {
    should_fail: bool,
    mock_data: Option<LcPcdData>,
}

impl PointCloudReader for MockReader {
    fn read_cloud(&self, _data: &[u8]) -> Result<LcPcdData> {
        if self.should_fail {
            return Err(PcdError::FormatError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(|| mock_cloud(Vec::new(), 0)))
    }
}

fn mock_header(point_count: u32, data_size: u32) -> ContainerHeader {
    ContainerHeader {
        version: 1,
        point_count,
        data_size,
        width: 64,
        height: 32,
        color_mode: ColorMode::Color,
        ratio: 1,
        reserved: [0u8; 228],
    }
}

fn mock_cloud(points: Vec<PointRecord>, data_size: u32) -> LcPcdData {
    LcPcdData {
        header: mock_header(points.len() as u32, data_size),
        points,
    }
}

fn point_at(w_pos: i16, h_pos: i16) -> PointRecord {
    PointRecord {
        x: w_pos as f64 * 0.5,
        y: h_pos as f64 * 0.5,
        z: 500.0,
        r: 200,
        g: 100,
        b: 50,
        w_pos,
        h_pos,
    }
}

/// Raster of points covering a 40x20 image, one point per pixel.
fn raster_points() -> Vec<PointRecord> {
    (0..20)
        .flat_map(|h| (0..40).map(move |w| point_at(w, h)))
        .collect()
}

fn encode_container(points: &[PointRecord]) -> Vec<u8> {
    let mut bytes = Vec::new();
    let count = points.len() as u32;
    for field in [1u32, count, count * 13, 40, 20, 1, 1] {
        bytes.extend_from_slice(&field.to_le_bytes());
    }
    bytes.resize(256, 0);
    xor_in_place(&mut bytes);

    for p in points {
        bytes.extend_from_slice(&[p.r, p.g, p.b]);
        for raw in [
            (p.x * 10.0).round() as i16,
            (p.y * 10.0).round() as i16,
            (p.z * 10.0).round() as i16,
            p.w_pos,
            p.h_pos,
        ] {
            bytes.extend_from_slice(&raw.to_le_bytes());
        }
    }
    bytes
}

#[test]
fn test_config_builder() {
    let config = PipelineConfig::builder()
        .parallel(false)
        .check_data_size(true)
        .max_regions(Some(4))
        .build();

    assert!(!config.parallel);
    assert!(config.check_data_size);
    assert_eq!(config.max_regions, Some(4));
}

#[test]
fn test_config_defaults() {
    let config = PipelineConfig::builder().build();
    assert!(config.parallel);
    assert!(!config.check_data_size);
    assert_eq!(config.max_regions, None);
}

#[test]
fn test_successful_run() {
    let points = raster_points();
    let data_size = points.len() as u32 * 13;
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(mock_cloud(points, data_size)),
    };
    let pipeline = CorrelationPipeline::with_custom(reader, PipelineConfig::default());

    let output = pipeline.run(b"fake container", REPORT).unwrap();

    assert_eq!(output.points.len(), 800);
    assert_eq!(output.correlation.len(), 2);
    // radius 2 disc on a full raster covers 13 pixels
    assert_eq!(output.correlation.get(1).unwrap().len(), 13);
    assert_eq!(output.correlation.get(3).unwrap().len(), 13);
    assert!(output.correlation.get(2).is_none());
    assert!(output.bounds.is_some());
}

#[test]
fn test_reader_failure() {
    let reader = MockReader {
        should_fail: true,
        mock_data: None,
    };
    let pipeline = CorrelationPipeline::with_custom(reader, PipelineConfig::default());

    let result = pipeline.run(b"fake container", REPORT);

    assert!(matches!(result.unwrap_err(), PcdError::FormatError(_)));
}

#[test]
fn test_report_failure() {
    let reader = MockReader {
        should_fail: false,
        mock_data: None,
    };
    let pipeline = CorrelationPipeline::with_custom(reader, PipelineConfig::default());

    let bad = "区域1检测结果:\n圆心坐标(原图): (10, ten)\n半径: 2像素\n";
    let result = pipeline.run(b"fake container", bad);

    assert!(matches!(result.unwrap_err(), PcdError::ParseError(_)));
}

#[test]
fn test_empty_report_gives_empty_mapping() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(mock_cloud(raster_points(), 800 * 13)),
    };
    let pipeline = CorrelationPipeline::with_custom(reader, PipelineConfig::default());

    let output = pipeline.run(b"fake container", "").unwrap();

    assert!(output.correlation.is_empty());
}

#[test]
fn test_empty_cloud_gives_empty_regions() {
    let reader = MockReader {
        should_fail: false,
        mock_data: None,
    };
    let pipeline = CorrelationPipeline::with_custom(reader, PipelineConfig::default());

    let output = pipeline.run(b"fake container", REPORT).unwrap();

    assert!(output.bounds.is_none());
    assert_eq!(output.correlation.len(), 2);
    assert!(output.correlation.iter().all(|m| m.is_empty()));
}

#[test]
fn test_data_size_mismatch_warns_by_default() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(mock_cloud(vec![point_at(0, 0)], 999)),
    };
    let pipeline = CorrelationPipeline::with_custom(reader, PipelineConfig::default());

    assert!(pipeline.run(b"fake container", "").is_ok());
}

#[test]
fn test_data_size_mismatch_fails_when_checked() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(mock_cloud(vec![point_at(0, 0)], 999)),
    };
    let config = PipelineConfig::builder().check_data_size(true).build();
    let pipeline = CorrelationPipeline::with_custom(reader, config);

    let result = pipeline.run(b"fake container", "");

    assert!(matches!(result.unwrap_err(), PcdError::FormatError(_)));
}

#[test]
fn test_max_regions_limits_correlation() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(mock_cloud(raster_points(), 800 * 13)),
    };
    let config = PipelineConfig::builder().max_regions(Some(1)).build();
    let pipeline = CorrelationPipeline::with_custom(reader, config);

    let output = pipeline.run(b"fake container", REPORT).unwrap();

    assert_eq!(output.correlation.len(), 1);
    assert!(output.correlation.get(3).is_none());
}

#[test]
fn test_correlate_with_parsed_regions() {
    let reader = MockReader {
        should_fail: false,
        mock_data: Some(mock_cloud(raster_points(), 800 * 13)),
    };
    let mut pipeline = CorrelationPipeline::with_custom(reader, PipelineConfig::default());
    pipeline.set_config(PipelineConfig::builder().parallel(false).build());
    assert!(!pipeline.config().parallel);

    let regions = [DetectionRegion::new(7, 0, 0, 1)];
    let output = pipeline.correlate(b"fake container", &regions).unwrap();

    let matched: Vec<(i16, i16)> = output
        .correlation
        .get(7)
        .unwrap()
        .iter()
        .map(|p| (p.w_pos, p.h_pos))
        .collect();
    assert_eq!(matched, vec![(0, 0), (1, 0), (0, 1)]);
}

#[test]
fn test_run_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let container_path = dir.path().join("scan.lc_pcd");
    let report_path = dir.path().join("scan_results.txt");

    let points = raster_points();
    std::fs::write(&container_path, encode_container(&points)).unwrap();
    let mut report_file = std::fs::File::create(&report_path).unwrap();
    report_file.write_all(REPORT.as_bytes()).unwrap();

    let pipeline = CorrelationPipeline::new(PipelineConfig::builder().check_data_size(true).build());
    let output = pipeline
        .run_files(&container_path, Some(&report_path))
        .unwrap();

    assert_eq!(output.header.point_count, 800);
    assert_eq!(output.header.color_mode, ColorMode::Color);
    assert_eq!(output.points.len(), points.len());
    for (decoded, original) in output.points.iter().zip(&points) {
        assert_eq!((decoded.w_pos, decoded.h_pos), (original.w_pos, original.h_pos));
        assert_eq!(decoded.color(), original.color());
        approx::assert_relative_eq!(decoded.x, original.x, epsilon = 1e-9);
        approx::assert_relative_eq!(decoded.z, original.z, epsilon = 1e-9);
    }

    let region = &output.correlation.entries()[0];
    let centroid = region.centroid().unwrap();
    approx::assert_relative_eq!(centroid[0], 5.0, epsilon = 1e-9);
    approx::assert_relative_eq!(centroid[1], 5.0, epsilon = 1e-9);
    approx::assert_relative_eq!(centroid[2], 500.0, epsilon = 1e-9);
}

#[test]
fn test_run_files_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let container_path = dir.path().join("scan.lc_pcd");
    std::fs::write(&container_path, encode_container(&raster_points())).unwrap();

    let pipeline = CorrelationPipeline::new(PipelineConfig::default());
    let output = pipeline
        .run_files(&container_path, None::<&std::path::Path>)
        .unwrap();

    assert_eq!(output.points.len(), 800);
    assert!(output.correlation.is_empty());
}

#[test]
fn test_run_files_missing_container() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = CorrelationPipeline::new(PipelineConfig::default());

    let result = pipeline.run_files(dir.path().join("missing.lc_pcd"), None::<&std::path::Path>);

    assert!(matches!(result.unwrap_err(), PcdError::InputReadError(_)));
}
