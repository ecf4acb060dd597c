#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod history;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod session;
pub mod stroke;

pub use app::PixelApp;
pub use config::{CanvasConfig, ReservedRegion};
pub use error::{CanvasError, CanvasResult, ConfigError, ExportError};
pub use export::GridSnapshot;
pub use grid::{CellPos, Grid};
pub use history::History;
pub use raster::{Line, clip_line, rasterize};
pub use renderer::GridRenderer;
pub use session::{EditSession, SessionState};
pub use stroke::{CellChange, Stroke, StrokeBuilder, StrokeKind};
