use egui::{Pos2, Rect, Vec2};

use crate::grid::CellPos;

/// Maps between screen space and grid cells for a canvas drawn into `rect`
#[derive(Debug, Clone, Copy)]
pub struct CanvasLayout {
    /// Screen rectangle the grid is drawn into
    pub rect: Rect,
    /// Number of cells along each side
    pub grid_size: usize,
}

impl CanvasLayout {
    pub fn new(rect: Rect, grid_size: usize) -> Self {
        Self { rect, grid_size }
    }

    /// Largest square layout centered in `available`
    pub fn fit(available: Rect, grid_size: usize) -> Self {
        let side = available.width().min(available.height()).max(0.0);
        Self::new(Rect::from_center_size(available.center(), Vec2::splat(side)), grid_size)
    }

    /// Screen size of one cell
    pub fn cell_size(&self) -> Vec2 {
        self.rect.size() / self.grid_size as f32
    }

    /// Cell under a screen position. Positions outside the canvas map to
    /// cells outside the grid.
    pub fn cell_at(&self, pos: Pos2) -> CellPos {
        let size = self.cell_size();
        let offset = pos - self.rect.min;
        CellPos::new(
            (offset.x / size.x).floor() as i32,
            (offset.y / size.y).floor() as i32,
        )
    }

    /// Whether a screen position lies over the canvas
    pub fn contains(&self, pos: Pos2) -> bool {
        let cell = self.cell_at(pos);
        let size = self.grid_size as i32;
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    /// Screen rectangle covered by `cell`
    pub fn cell_rect(&self, cell: CellPos) -> Rect {
        let size = self.cell_size();
        let min = self.rect.min + Vec2::new(cell.x as f32 * size.x, cell.y as f32 * size.y);
        Rect::from_min_size(min, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn layout() -> CanvasLayout {
        CanvasLayout::new(Rect::from_min_size(pos2(10.0, 20.0), Vec2::splat(320.0)), 32)
    }

    #[test]
    fn test_cell_at() {
        let layout = layout();
        assert_eq!(layout.cell_at(pos2(10.0, 20.0)), CellPos::new(0, 0));
        assert_eq!(layout.cell_at(pos2(29.9, 39.9)), CellPos::new(1, 1));
        assert_eq!(layout.cell_at(pos2(329.0, 339.0)), CellPos::new(31, 31));
        assert_eq!(layout.cell_at(pos2(5.0, 20.0)), CellPos::new(-1, 0));
        assert_eq!(layout.cell_at(pos2(330.0, 20.0)), CellPos::new(32, 0));
    }

    #[test]
    fn test_contains() {
        let layout = layout();
        assert!(layout.contains(pos2(100.0, 100.0)));
        assert!(!layout.contains(pos2(9.0, 100.0)));
        assert!(!layout.contains(pos2(100.0, 341.0)));
    }

    #[test]
    fn test_cell_rect_round_trip() {
        let layout = layout();
        let rect = layout.cell_rect(CellPos::new(3, 5));
        assert_eq!(rect.min, pos2(40.0, 70.0));
        assert_eq!(layout.cell_at(rect.center()), CellPos::new(3, 5));
    }

    #[test]
    fn test_fit_is_square_and_centered() {
        let layout = CanvasLayout::fit(Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(400.0, 200.0)), 8);
        assert_eq!(layout.rect.size(), Vec2::splat(200.0));
        assert_eq!(layout.rect.center(), pos2(200.0, 100.0));
    }
}
