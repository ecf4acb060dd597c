use egui::Color32;

use crate::color::parse_color;
use crate::config::CanvasConfig;
use crate::error::{CanvasError, CanvasResult};
use crate::export::GridSnapshot;

/// Address of one grid cell. Signed so that pointer positions left of or
/// above the canvas can be expressed before they are bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for CellPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Largest supported number of cells along a grid side
pub const MAX_GRID_SIZE: usize = 1024;

/// The square matrix of cell colors.
///
/// Every cell always holds a color. Reserved cells carry a fixed template
/// color from creation onwards and ignore every write.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    background: Color32,
    cells: Vec<Color32>,
    /// Fixed color of each reserved cell, `None` for editable cells
    template: Vec<Option<Color32>>,
}

impl Grid {
    /// Build a grid from a validated config, painting the reserved regions
    pub fn new(config: &CanvasConfig) -> CanvasResult<Self> {
        config.validate()?;
        let background = parse_color(&config.background)?;

        let mut template = Vec::new();
        for region in &config.reserved {
            let color = parse_color(&region.color)?;
            template.extend(
                region
                    .cells()
                    .map(|(x, y)| (CellPos::new(x as i32, y as i32), color)),
            );
        }

        Self::with_template(config.grid_size, background, &template)
    }

    /// Build a `size`x`size` grid filled with `background`, with each
    /// `(cell, color)` of `template` reserved.
    pub fn with_template(
        size: usize,
        background: Color32,
        template: &[(CellPos, Color32)],
    ) -> CanvasResult<Self> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(CanvasError::InvalidConfig(format!("unsupported grid size {size}")));
        }

        let mut grid = Self {
            size,
            background,
            cells: vec![background; size * size],
            template: vec![None; size * size],
        };
        for &(pos, color) in template {
            let index = grid.index(pos.x, pos.y)?;
            grid.template[index] = Some(color);
            grid.cells[index] = color;
        }
        Ok(grid)
    }

    /// Number of cells along each side
    pub fn size(&self) -> usize {
        self.size
    }

    /// Color new and cleared cells take
    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_ok()
    }

    fn index(&self, x: i32, y: i32) -> CanvasResult<usize> {
        let size = self.size as i32;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Ok(y as usize * self.size + x as usize)
        } else {
            Err(CanvasError::OutOfBounds { x, y, size: self.size })
        }
    }

    pub fn get(&self, x: i32, y: i32) -> CanvasResult<Color32> {
        let index = self.index(x, y)?;
        Ok(self.cells[index])
    }

    /// Write `color` into a cell and return the color it held before.
    ///
    /// Reserved cells are left untouched and report their current color.
    pub fn set(&mut self, x: i32, y: i32, color: Color32) -> CanvasResult<Color32> {
        let index = self.index(x, y)?;
        let previous = self.cells[index];
        if self.template[index].is_none() {
            self.cells[index] = color;
        }
        Ok(previous)
    }

    /// Overwrite every non-reserved cell with `color`
    pub fn fill(&mut self, color: Color32) {
        for (cell, fixed) in self.cells.iter_mut().zip(&self.template) {
            *cell = fixed.unwrap_or(color);
        }
    }

    /// Out-of-bounds coordinates are never reserved
    pub fn is_reserved(&self, x: i32, y: i32) -> bool {
        self.index(x, y)
            .map(|index| self.template[index].is_some())
            .unwrap_or(false)
    }

    /// Iterate every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, Color32)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(index, &color)| {
            (CellPos::new((index % size) as i32, (index / size) as i32), color)
        })
    }

    /// Read-only copy of the cell colors for export
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            width: self.size,
            height: self.size,
            pixels: self.cells.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: Color32 = Color32::WHITE;
    const R: Color32 = Color32::RED;
    const K: Color32 = Color32::BLACK;

    fn grid_with_reserved() -> Grid {
        Grid::with_template(4, W, &[(CellPos::new(1, 1), K)]).unwrap()
    }

    #[test]
    fn test_new_grid_is_background() {
        let grid = Grid::with_template(3, W, &[]).unwrap();
        assert!(grid.cells().all(|(_, color)| color == W));
        assert_eq!(grid.cells().count(), 9);
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = grid_with_reserved();
        assert_eq!(grid.set(2, 3, R), Ok(W));
        assert_eq!(grid.get(2, 3), Ok(R));
        assert_eq!(grid.set(2, 3, K), Ok(R));
    }

    #[test]
    fn test_reserved_cell_ignores_writes() {
        let mut grid = grid_with_reserved();
        assert!(grid.is_reserved(1, 1));
        assert_eq!(grid.set(1, 1, R), Ok(K));
        assert_eq!(grid.get(1, 1), Ok(K));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = grid_with_reserved();
        let before = grid.clone();
        assert_eq!(grid.get(4, 0), Err(CanvasError::OutOfBounds { x: 4, y: 0, size: 4 }));
        assert_eq!(grid.set(-1, 2, R), Err(CanvasError::OutOfBounds { x: -1, y: 2, size: 4 }));
        assert_eq!(grid, before);
        assert!(!grid.is_reserved(-1, -1));
    }

    #[test]
    fn test_fill_keeps_reserved_cells() {
        let mut grid = grid_with_reserved();
        grid.fill(R);
        for (pos, color) in grid.cells() {
            let expected = if pos == CellPos::new(1, 1) { K } else { R };
            assert_eq!(color, expected, "cell {pos:?}");
        }
    }

    #[test]
    fn test_template_outside_grid_is_rejected() {
        let result = Grid::with_template(4, W, &[(CellPos::new(4, 4), K)]);
        assert!(matches!(result, Err(CanvasError::OutOfBounds { .. })));
    }

    #[test]
    fn test_default_config_reserves_template_columns() {
        let grid = Grid::new(&CanvasConfig::default()).unwrap();
        let template = parse_color("#0F0E0C").unwrap();
        for y in 25..32 {
            assert!(grid.is_reserved(10, y));
            assert_eq!(grid.get(10, y), Ok(template));
        }
        assert!(!grid.is_reserved(10, 24));
        for y in 27..32 {
            assert!(grid.is_reserved(16, y));
        }
        assert!(!grid.is_reserved(16, 26));
        assert_eq!(grid.get(0, 0), Ok(parse_color("#FCE184").unwrap()));
    }

    #[test]
    fn test_invalid_config_color() {
        let config = CanvasConfig {
            background: "not-a-color".to_owned(),
            ..CanvasConfig::blank(4)
        };
        assert_eq!(Grid::new(&config), Err(CanvasError::InvalidColor("not-a-color".to_owned())));
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let result = Grid::with_template(MAX_GRID_SIZE + 1, W, &[]);
        assert!(matches!(result, Err(CanvasError::InvalidConfig(_))));
        assert!(Grid::with_template(0, W, &[]).is_err());
    }
}
