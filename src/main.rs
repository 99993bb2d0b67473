use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use lc_pcd_rs::logger;
use lc_pcd_rs::pcd_pipeline::{
    CorrelationOutput, CorrelationPipeline, PipelineConfig, ReportWriter, StandardReportWriter,
    lc_pcd::{default_report_path, locate_container},
    report::parse_outcomes,
};

/// Decode lc_pcd point clouds and match their points to detected circles
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the header and coordinate ranges of a container
    Inspect {
        /// Container file, or a directory holding one
        path: PathBuf,
    },
    /// Match container points against a detection report
    Correlate {
        /// Container file, or a directory holding one
        path: PathBuf,

        /// Detection report; defaults to detection_results/<stem>_results.txt
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Scan regions one after another instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Reject containers whose data_size disagrees with the point count
        #[arg(long)]
        strict: bool,

        /// Only correlate the first N detected regions
        #[arg(long)]
        max_regions: Option<usize>,
    },
    /// Re-emit a detection report in canonical form
    Normalize {
        input: PathBuf,
        output: PathBuf,

        /// Title line; defaults to the input file stem
        #[arg(short, long)]
        title: Option<String>,
    },
}

fn log_cloud(output: &CorrelationOutput) {
    let header = &output.header;
    info!(
        version = header.version,
        point_count = header.point_count,
        data_size = header.data_size,
        width = header.width,
        height = header.height,
        color = %header.color_mode,
        ratio = header.ratio,
        "Header"
    );
    info!("Decoded {} points", output.points.len());

    if let Some(first) = output.points.first() {
        info!(
            "First point: position ({:.1}, {:.1}, {:.1}) mm, color ({}, {}, {}), pixel ({}, {})",
            first.x, first.y, first.z, first.r, first.g, first.b, first.w_pos, first.h_pos
        );
    }

    if let Some(bounds) = &output.bounds {
        let extent = bounds.extent();
        for (axis, name) in ["X", "Y", "Z"].iter().enumerate() {
            info!(
                "{} range: {:.1} to {:.1} mm (extent {:.1})",
                name, bounds.min[axis], bounds.max[axis], extent[axis]
            );
        }
    }
}

fn log_matches(output: &CorrelationOutput) {
    for entry in output.correlation.iter() {
        let region = &entry.region;
        match entry.centroid() {
            Some(c) => info!(
                "Region {} at ({}, {}) r={}: {} points, centroid ({:.1}, {:.1}, {:.1}) mm",
                region.region_id,
                region.center_x,
                region.center_y,
                region.radius,
                entry.points.len(),
                c[0],
                c[1],
                c[2]
            ),
            None => warn!(
                "Region {} at ({}, {}) r={}: no points",
                region.region_id, region.center_x, region.center_y, region.radius
            ),
        }
    }
}

fn inspect(path: &Path) -> Result<()> {
    let container = locate_container(path)?;
    let pipeline = CorrelationPipeline::new(PipelineConfig::default());
    let output = pipeline
        .run_files(&container, None::<&Path>)
        .with_context(|| format!("decoding {}", container.display()))?;
    log_cloud(&output);
    Ok(())
}

fn correlate(path: &Path, report: Option<PathBuf>, config: PipelineConfig) -> Result<()> {
    let container = locate_container(path)?;

    let report = match report {
        Some(report) => Some(report),
        None => {
            let candidate = default_report_path(&container);
            if candidate.is_file() {
                info!("Found detection report {}", candidate.display());
                Some(candidate)
            } else {
                warn!(
                    "No detection report at {}, correlating against no regions",
                    candidate.display()
                );
                None
            }
        }
    };

    let pipeline = CorrelationPipeline::new(config);
    let output = pipeline
        .run_files(&container, report.as_deref())
        .with_context(|| format!("correlating {}", container.display()))?;

    log_cloud(&output);
    log_matches(&output);
    Ok(())
}

fn normalize(input: &Path, output: &Path, title: Option<String>) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let outcomes = parse_outcomes(&text)?;

    let missed: Vec<u32> = outcomes
        .iter()
        .filter(|outcome| outcome.detection().is_none())
        .map(|outcome| outcome.region_id())
        .collect();
    if !missed.is_empty() {
        info!("Regions without a circle: {:?}", missed);
    }

    let title = title.unwrap_or_else(|| {
        input
            .file_stem()
            .map(|s| s.to_string_lossy().trim_end_matches("_results").to_string())
            .unwrap_or_default()
    });

    let mut file = std::fs::File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    StandardReportWriter.write_report(&title, &outcomes, &mut file)?;

    info!(
        "Wrote {} blocks to {}",
        outcomes.len(),
        output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(if args.verbose { "debug" } else { "info" });

    match args.command {
        Command::Inspect { path } => inspect(&path),
        Command::Correlate {
            path,
            report,
            sequential,
            strict,
            max_regions,
        } => {
            let config = PipelineConfig::builder()
                .parallel(!sequential)
                .check_data_size(strict)
                .max_regions(max_regions)
                .build();
            correlate(&path, report, config)
        }
        Command::Normalize {
            input,
            output,
            title,
        } => normalize(&input, &output, title),
    }
}
