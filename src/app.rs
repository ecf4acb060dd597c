use std::path::PathBuf;

use egui::{Color32, Key, Modifiers};

use crate::color::parse_color;
use crate::config::CanvasConfig;
use crate::error::CanvasResult;
use crate::grid::CellPos;
use crate::input::CanvasLayout;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::GridRenderer;
use crate::session::EditSession;

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "PIXEL_CANVAS_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "pixel_canvas.json";

pub struct PixelApp {
    pub(crate) session: EditSession,
    pub(crate) config: CanvasConfig,
    pub(crate) palette: Vec<Color32>,
    pub(crate) renderer: GridRenderer,
    /// Cell under the pointer, if the pointer is over the canvas
    pub(crate) hover: Option<CellPos>,
    pub(crate) status: Option<String>,
}

impl PixelApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> CanvasResult<Self> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        let config = CanvasConfig::load_or_default(&path);

        match Self::from_config(config) {
            Ok(app) => Ok(app),
            Err(err) => {
                log::error!("Config {} is unusable ({}), using defaults", path.display(), err);
                Self::from_config(CanvasConfig::default())
            }
        }
    }

    pub fn from_config(config: CanvasConfig) -> CanvasResult<Self> {
        let session = EditSession::new(&config)?;
        let palette = config
            .palette
            .iter()
            .filter_map(|spec| match parse_color(spec) {
                Ok(color) => Some(color),
                Err(err) => {
                    log::warn!("Skipping palette entry: {}", err);
                    None
                }
            })
            .collect();

        Ok(Self {
            session,
            config,
            palette,
            renderer: GridRenderer::new(),
            hover: None,
            status: None,
        })
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn undo(&mut self) {
        if self.session.undo().is_none() {
            log::debug!("Nothing to undo");
        }
    }

    pub fn redo(&mut self) {
        if self.session.redo().is_none() {
            log::debug!("Nothing to redo");
        }
    }

    pub fn clear(&mut self) {
        if !self.session.clear_all() {
            self.status = Some("Canvas is already clear".to_owned());
        }
    }

    /// Write the current grid to the configured PNG file
    pub fn save(&mut self) {
        let snapshot = self.session.grid().snapshot();
        let file = &self.config.export_file;
        self.status = Some(match snapshot.save_png(file, self.config.export_scale) {
            Ok(()) => format!("Saved {file}"),
            Err(err) => {
                log::error!("Failed to export {}: {}", file, err);
                format!("Save failed: {err}")
            }
        });
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (redo_shift, undo, redo, escape) = ctx.input_mut(|i| {
            (
                i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z),
                i.consume_key(Modifiers::COMMAND, Key::Z),
                i.consume_key(Modifiers::COMMAND, Key::Y),
                i.key_pressed(Key::Escape),
            )
        });

        if escape && self.session.is_stroking() {
            self.session.abort();
            self.status = Some("Stroke cancelled".to_owned());
        }
        if undo {
            self.undo();
        }
        if redo || redo_shift {
            self.redo();
        }
    }

    /// Drive the edit session from the pointer state for this frame
    pub(crate) fn handle_pointer(
        &mut self,
        ctx: &egui::Context,
        response: &egui::Response,
        layout: &CanvasLayout,
    ) {
        let (latest, pressed, down, released, in_window) = ctx.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.hover_pos().is_some(),
            )
        });

        self.hover = response
            .hover_pos()
            .filter(|pos| layout.contains(*pos))
            .map(|pos| layout.cell_at(pos));

        if self.session.is_stroking() && !in_window {
            self.session.abort();
            self.status = Some("Stroke cancelled".to_owned());
            return;
        }

        let Some(pos) = latest else {
            return;
        };
        let cell = layout.cell_at(pos);

        if pressed && response.hovered() {
            self.session.press(cell.x, cell.y);
        } else if down && self.session.is_stroking() {
            self.session.move_to(cell.x, cell.y);
        }

        if released && self.session.is_stroking() {
            self.session.release();
        }
    }
}

impl eframe::App for PixelApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
