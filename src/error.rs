use thiserror::Error;

/// Errors raised by grid queries and mutations.
///
/// A failed call never mutates the grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },

    #[error("invalid color specification: {0:?}")]
    InvalidColor(String),

    #[error("invalid canvas configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for grid operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur while loading a canvas configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(#[from] CanvasError),
}

/// Errors that can occur while exporting the grid to an image file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Export scale must be at least 1 pixel per cell, got {0}")]
    InvalidScale(u32),

    #[error("A {width}x{height} grid at scale {scale} exceeds the maximum image size")]
    TooLarge { width: usize, height: usize, scale: u32 },
}
