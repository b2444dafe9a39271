use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasinError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Dimension mismatch for {what}: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Connectivity {connectivity} is not valid for a {ndim}D grid")]
    InvalidConnectivity { connectivity: u8, ndim: usize },

    #[error("Coordinate {coord:?} is outside the grid")]
    OutOfBounds { coord: [usize; 3] },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Flooding invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Flooding was cancelled")]
    Cancelled,

    #[error("No slice images found in {0}")]
    EmptyVolume(String),
}

pub type Result<T> = std::result::Result<T, BasinError>;
