use std::path::PathBuf;

use anyhow::Result;
use basin_core::markers::{label_components, regional_minima};
use clap::{Args, ValueEnum};

use super::{
    input_ndim, read_intensity, read_mask, resolve_connectivity, shape_string, write_labels,
};

#[derive(Clone, ValueEnum)]
pub enum MarkerMethod {
    /// One marker per connected nonzero component of a binary image
    Components,
    /// One marker per regional minimum of an intensity image
    Minima,
}

#[derive(Args)]
pub struct MarkersArgs {
    /// Input image, or a directory of slice images for a volume
    pub input: PathBuf,

    /// How markers are derived from the input
    #[arg(long, value_enum, default_value = "components")]
    pub method: MarkerMethod,

    /// Neighbor count: 4 or 8 for images, 6 or 26 for volumes
    #[arg(long)]
    pub connectivity: Option<u8>,

    /// Output marker image (16-bit), or directory for volumes
    #[arg(short, long, default_value = "markers.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &MarkersArgs) -> Result<()> {
    let connectivity = resolve_connectivity(args.connectivity, input_ndim(&args.input))?;

    let markers = match args.method {
        MarkerMethod::Components => {
            let binary = read_mask(&args.input)?;
            label_components(binary.view(), connectivity)?
        }
        MarkerMethod::Minima => {
            let intensity = read_intensity(&args.input)?;
            regional_minima(intensity.view(), connectivity)?
        }
    };
    let count = markers.iter().copied().max().unwrap_or(0);

    write_labels(&markers, &args.output)?;

    println!("Input:        {}", args.input.display());
    println!("Dimensions:   {}", shape_string(markers.shape()));
    println!("Connectivity: {}", connectivity);
    println!("Markers:      {}", count);
    println!("\nMarkers saved to {}", args.output.display());

    Ok(())
}
