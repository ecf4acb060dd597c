use egui::{Color32, Painter, Stroke};

use crate::color::invert;
use crate::grid::{CellPos, Grid};
use crate::input::CanvasLayout;

const GRID_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 51);

/// Paints the grid, the optional grid-line overlay and the hover highlight
#[derive(Debug, Default)]
pub struct GridRenderer {
    show_grid: bool,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Redraw the whole canvas into `layout` with `painter`, outlining the
    /// `hover` cell in the inverse of its color.
    pub fn render(&self, painter: &Painter, layout: &CanvasLayout, grid: &Grid, hover: Option<CellPos>) {
        for (pos, color) in grid.cells() {
            painter.rect_filled(layout.cell_rect(pos), 0.0, color);
        }

        if self.show_grid {
            self.render_grid_lines(painter, layout);
        }

        if let Some(cell) = hover {
            if let Ok(color) = grid.get(cell.x, cell.y) {
                let width = (layout.cell_size().x * 0.1).max(1.0);
                painter.rect_stroke(
                    layout.cell_rect(cell).shrink(width / 2.0),
                    0.0,
                    Stroke::new(width, invert(color)),
                );
            }
        }
    }

    fn render_grid_lines(&self, painter: &Painter, layout: &CanvasLayout) {
        let rect = layout.rect;
        let cell = layout.cell_size();
        let stroke = Stroke::new((cell.x * 0.1).max(1.0), GRID_LINE_COLOR);

        for i in 1..layout.grid_size {
            let x = rect.min.x + i as f32 * cell.x;
            painter.line_segment([egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)], stroke);
            let y = rect.min.y + i as f32 * cell.y;
            painter.line_segment([egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)], stroke);
        }
    }
}
