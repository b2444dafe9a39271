use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use basin_core::flood::{flood, CancelToken, FloodStage, ProgressReporter, WatershedConfig};
use basin_core::markers::regional_minima;
use basin_core::regions::region_stats;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    input_ndim, read_intensity, read_labels, read_mask, resolve_connectivity, write_colors,
    write_labels,
};
use crate::summary::{print_flood_summary, print_segment_summary};

#[derive(Args)]
pub struct SegmentArgs {
    /// Intensity image, or a directory of slice images for a volume
    pub input: PathBuf,

    /// Segmentation config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Marker image (or slice directory); nonzero values are region ids
    #[arg(long, conflicts_with = "minima")]
    pub markers: Option<PathBuf>,

    /// Seed one region per regional minimum of the input
    #[arg(long)]
    pub minima: bool,

    /// Mask image (or slice directory); flooding stays inside nonzero pixels
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Neighbor count: 4 or 8 for images, 6 or 26 for volumes
    #[arg(long)]
    pub connectivity: Option<u8>,

    /// Label every reachable cell instead of leaving dam lines
    #[arg(long)]
    pub no_dams: bool,

    /// Distance-to-marker weight for compact watershed
    #[arg(long, default_value = "0")]
    pub compactness: f64,

    /// Output label image (16-bit), or directory for volumes
    #[arg(short, long, default_value = "labels.tiff")]
    pub output: PathBuf,

    /// Also save a color rendering of the labels (PNG)
    #[arg(long)]
    pub colors: Option<PathBuf>,
}

/// Everything one `segment` run needs, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SegmentConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub markers: Option<PathBuf>,
    /// Seed from regional minima when no marker image is given.
    #[serde(default)]
    pub minima: bool,
    #[serde(default)]
    pub mask: Option<PathBuf>,
    #[serde(default)]
    pub colors: Option<PathBuf>,
    #[serde(default)]
    pub watershed: WatershedConfig,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.tiff"),
            output: PathBuf::from("labels.tiff"),
            markers: Some(PathBuf::from("markers.tiff")),
            minima: false,
            mask: None,
            colors: None,
            watershed: WatershedConfig::default(),
        }
    }
}

/// Drives an indicatif bar from flood progress callbacks.
struct BarReporter {
    bar: ProgressBar,
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: FloodStage) {
        self.bar.set_message(stage.to_string());
        self.bar.set_position(0);
    }

    fn progress(&self, fraction: f32) {
        self.bar.set_position((fraction * 100.0) as u64);
    }

    fn finish_stage(&self) {
        self.bar.set_position(100);
    }
}

pub fn run(args: &SegmentArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid segmentation config")?
    } else {
        build_config_from_args(args)?
    };
    if config.markers.is_none() && !config.minima {
        bail!("No markers given: pass --markers <path> or --minima");
    }

    let ndim = input_ndim(&config.input);
    print_segment_summary(&config, ndim);

    let intensity = read_intensity(&config.input)?;
    let markers = match config.markers {
        Some(ref path) => read_labels(path)?,
        None => {
            let connectivity = match config.watershed.connectivity {
                Some(connectivity) => connectivity,
                None => resolve_connectivity(None, ndim)?,
            };
            regional_minima(intensity.view(), connectivity)?
        }
    };
    let mask = config.mask.as_deref().map(read_mask).transpose()?;
    debug!(
        shape = ?intensity.shape(),
        markers = markers.iter().filter(|&&m| m > 0).count(),
        masked = mask.is_some(),
        "Loaded inputs"
    );

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:20} [{bar:40}] {pos}%")?
            .progress_chars("=> "),
    );
    let reporter = BarReporter { bar: pb.clone() };

    let start = Instant::now();
    let output = flood(
        intensity.view(),
        markers.view(),
        mask.as_ref().map(|m| m.view()),
        &config.watershed,
        &CancelToken::new(),
        Some(&reporter),
    )?;
    let elapsed = start.elapsed();
    pb.finish_with_message("Done");

    write_labels(&output.labels, &config.output)?;
    if let Some(ref colors) = config.colors {
        write_colors(&output.labels, colors)?;
    }

    let regions = region_stats(output.labels.view())?.len();
    print_flood_summary(&output.report, regions, elapsed);
    println!("\nLabels saved to {}", config.output.display());
    if let Some(ref colors) = config.colors {
        println!("Colors saved to {}", colors.display());
    }

    Ok(())
}

fn build_config_from_args(args: &SegmentArgs) -> Result<SegmentConfig> {
    let ndim = input_ndim(&args.input);
    let mut watershed = WatershedConfig::default()
        .with_dams(!args.no_dams)
        .with_compactness(args.compactness);
    if args.connectivity.is_some() {
        watershed = watershed.with_connectivity(resolve_connectivity(args.connectivity, ndim)?);
    }

    Ok(SegmentConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        markers: args.markers.clone(),
        minima: args.minima,
        mask: args.mask.clone(),
        colors: args.colors.clone(),
        watershed,
    })
}
