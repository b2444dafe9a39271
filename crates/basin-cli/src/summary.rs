use std::time::Duration;

use basin_core::flood::FloodReport;
use console::Style;

use crate::commands::segment::SegmentConfig;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_segment_summary(config: &SegmentConfig, ndim: usize) {
    let s = Styles::new();
    let ws = &config.watershed;

    println!();
    println!("  {}", s.title.apply_to("Basin Watershed"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Kind"),
        s.value.apply_to(if ndim == 3 { "volume" } else { "image" })
    );
    println!();

    println!("  {}", s.header.apply_to("Seeds"));
    match config.markers {
        Some(ref path) => println!(
            "    {:<12}{}",
            s.label.apply_to("Markers"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Markers"),
            s.method.apply_to("regional minima")
        ),
    }
    match config.mask {
        Some(ref path) => println!(
            "    {:<12}{}",
            s.label.apply_to("Mask"),
            s.path.apply_to(path.display())
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Mask"),
            s.disabled.apply_to("none")
        ),
    }
    println!();

    println!("  {}", s.header.apply_to("Flooding"));
    let connectivity = match ws.connectivity {
        Some(c) => c.to_string(),
        None => "default".to_string(),
    };
    println!(
        "    {:<12}{}",
        s.label.apply_to("Neighbors"),
        s.method.apply_to(connectivity)
    );
    if ws.compute_dams {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Dams"),
            s.value.apply_to("on")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Dams"),
            s.disabled.apply_to("off")
        );
    }
    if ws.compactness > 0.0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Compactness"),
            s.value.apply_to(ws.compactness)
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Compactness"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();
}

pub fn print_flood_summary(report: &FloodReport, regions: usize, elapsed: Duration) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Regions"),
        s.value.apply_to(regions)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Seeds"),
        s.value.apply_to(report.seeds)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Flooded"),
        s.value.apply_to(report.labeled)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Dams"),
        s.value.apply_to(report.dams)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Time"),
        s.value.apply_to(format!("{:.2?}", elapsed))
    );
}
