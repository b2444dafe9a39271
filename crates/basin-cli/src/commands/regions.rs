use std::path::PathBuf;

use anyhow::Result;
use basin_core::regions::{background_count, dam_mask, region_stats};
use clap::Args;

use super::{input_ndim, read_labels, read_mask, resolve_connectivity, shape_string};

#[derive(Args)]
pub struct RegionsArgs {
    /// Label image, or a directory of slice images for a volume
    pub input: PathBuf,

    /// Mask image (or slice directory) the labels were flooded in
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Neighbor count used to find dam cells
    #[arg(long)]
    pub connectivity: Option<u8>,

    /// Print at most this many regions (largest first)
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run(args: &RegionsArgs) -> Result<()> {
    let labels = read_labels(&args.input)?;
    let mask = args.mask.as_deref().map(read_mask).transpose()?;
    let connectivity = resolve_connectivity(args.connectivity, input_ndim(&args.input))?;

    let mut stats = region_stats(labels.view())?;
    let dams = dam_mask(labels.view(), mask.as_ref().map(|m| m.view()), connectivity)?;
    let dam_cells = dams.iter().filter(|&&d| d).count();

    println!("File:        {}", args.input.display());
    println!("Dimensions:  {}", shape_string(labels.shape()));
    println!("Regions:     {}", stats.len());
    println!("Background:  {}", background_count(labels.view()));
    println!("Dam cells:   {} ({})", dam_cells, connectivity);

    if let Some(top) = args.top {
        stats.sort_by(|a, b| b.area.cmp(&a.area).then(a.label.cmp(&b.label)));
        stats.truncate(top);
    }
    if stats.is_empty() {
        return Ok(());
    }

    println!();
    println!("{:>8}  {:>10}  Bounds [plane, row, col]", "Label", "Area");
    for region in &stats {
        println!(
            "{:>8}  {:>10}  {:?} .. {:?}",
            region.label, region.area, region.min, region.max
        );
    }

    Ok(())
}
