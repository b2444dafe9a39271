/// Minimum cell count (planes * rows * cols) to use row-level Rayon
/// parallelism in the seeding pass.
pub const PARALLEL_CELL_THRESHOLD: usize = 65_536;

/// Number of distinct progress steps reported over one flood (1% granularity).
pub const PROGRESS_STEPS: u32 = 100;

/// Label value reserved for background and watershed lines in output grids.
pub const BACKGROUND_LABEL: u32 = 0;

/// Largest label value representable in a 16-bit label image.
pub const MAX_LABEL_16BIT: u32 = u16::MAX as u32;

/// Golden-ratio hue step used to spread label colors around the color wheel.
pub const LABEL_HUE_STEP: f32 = 0.618_034;

/// Saturation and value of rendered label colors.
pub const LABEL_SATURATION: f32 = 0.65;
pub const LABEL_VALUE: f32 = 0.95;
