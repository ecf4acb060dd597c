use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult, ConfigError};
use crate::export::MAX_EXPORT_SIDE;
use crate::grid::MAX_GRID_SIZE;

/// A fixed rectangle of template cells that drawing can never overwrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedRegion {
    /// Left column of the region
    pub x: usize,
    /// Top row of the region
    pub y: usize,
    pub width: usize,
    pub height: usize,
    /// Color the region is painted with when the grid is created
    pub color: String,
}

impl ReservedRegion {
    /// A vertical line of `height` cells in column `x`, resting on the bottom
    /// row of a `grid_size` grid.
    pub fn bottom_column(grid_size: usize, x: usize, height: usize, color: &str) -> Self {
        Self {
            x,
            y: grid_size.saturating_sub(height),
            width: 1,
            height,
            color: color.to_owned(),
        }
    }

    /// Iterate the `(x, y)` cells covered by this region
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y..self.y.saturating_add(self.height))
            .flat_map(move |y| (self.x..self.x.saturating_add(self.width)).map(move |x| (x, y)))
    }
}

/// Settings for one canvas. Missing fields in a config file fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Number of cells along each side of the square grid
    pub grid_size: usize,
    /// Color every non-reserved cell starts with and returns to on clear
    pub background: String,
    /// Initially selected brush color
    pub brush: String,
    /// Maximum number of strokes kept for undo
    pub max_history: usize,
    pub reserved: Vec<ReservedRegion>,
    /// Swatches offered by the tools panel
    pub palette: Vec<String>,
    /// Output pixels per grid cell when exporting
    pub export_scale: u32,
    pub export_file: String,
}

const TEMPLATE_COLOR: &str = "#0F0E0C";

impl Default for CanvasConfig {
    fn default() -> Self {
        let grid_size = 32;
        Self {
            grid_size,
            background: "#FCE184".to_owned(),
            brush: TEMPLATE_COLOR.to_owned(),
            max_history: 100,
            reserved: vec![
                ReservedRegion::bottom_column(grid_size, 10, 7, TEMPLATE_COLOR),
                ReservedRegion::bottom_column(grid_size, grid_size - 16, 5, TEMPLATE_COLOR),
            ],
            palette: [
                "#0F0E0C", "#FCE184", "#FFFFFF", "#7F7F7F", "#E63946", "#F4A261",
                "#2A9D8F", "#264653", "#457B9D", "#A8DADC", "#6A4C93", "#FF99C8",
            ]
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
            export_scale: 100,
            export_file: "my-pixel-art.png".to_owned(),
        }
    }
}

impl CanvasConfig {
    /// A config for a plain `grid_size` grid with no reserved cells
    pub fn blank(grid_size: usize) -> Self {
        Self {
            grid_size,
            reserved: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a config file, falling back to the defaults if it is missing or
    /// broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded canvas config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }

    /// Check the structural constraints a grid needs. Color strings are
    /// checked when the grid is built.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.grid_size == 0 {
            return Err(CanvasError::InvalidConfig("grid_size must be at least 1".into()));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(CanvasError::InvalidConfig(format!(
                "grid_size {} exceeds the maximum of {}",
                self.grid_size, MAX_GRID_SIZE
            )));
        }
        if self.max_history == 0 {
            return Err(CanvasError::InvalidConfig("max_history must be at least 1".into()));
        }
        let export_side = u32::try_from(self.grid_size)
            .ok()
            .and_then(|size| size.checked_mul(self.export_scale));
        if !matches!(export_side, Some(1..=MAX_EXPORT_SIDE)) {
            return Err(CanvasError::InvalidConfig(format!(
                "export_scale {} must give an image side between 1 and {} pixels",
                self.export_scale, MAX_EXPORT_SIDE
            )));
        }
        for region in &self.reserved {
            let fits = matches!(region.x.checked_add(region.width), Some(end) if end <= self.grid_size)
                && matches!(region.y.checked_add(region.height), Some(end) if end <= self.grid_size);
            if !fits {
                return Err(CanvasError::InvalidConfig(format!(
                    "reserved region at ({}, {}) sized {}x{} does not fit a {}x{} grid",
                    region.x, region.y, region.width, region.height, self.grid_size, self.grid_size
                )));
            }
        }
        Ok(())
    }
}
